use postbox::{BlogServer, PostStore, WritePolicy};
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), postbox::Error> {
    let path = std::env::temp_dir().join("postbox_demo_builder.json");
    let _ = std::fs::remove_file(&path);

    // compact JSON + one cycle at a time with atomic saves
    let store = PostStore::builder(&path)
        .pretty(false)
        .policy(WritePolicy::Serialized)
        .build()?;
    store.init()?;
    let blog = Arc::new(BlogServer::new(store));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let blog = Arc::clone(&blog);
            thread::spawn(move || blog.create(format!("from thread {t}"), "", "builder"))
        })
        .collect();
    for h in handles {
        if let Ok(res) = h.join() {
            res?;
        }
    }

    // with WritePolicy::Direct some of these could have been lost
    println!("stored posts: {}", blog.store().load()?.len());
    println!("\nDebug output: {:?}", blog.store());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
