use postbox::{Blog, BlogServer, CreatePostRequest, GetPostsRequest, PostStore};

fn main() -> Result<(), postbox::Error> {
    let path = std::env::temp_dir().join("postbox_demo_basic.json");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::open(&path)?;
    store.init()?;
    let blog = BlogServer::new(store);

    // create
    let post = blog.create_post(CreatePostRequest::new("Hello", "First post", "demo"))?;
    println!("created: {post:?}");
    blog.create_post(CreatePostRequest::new("Again", "Second post", "demo"))?;

    // every listing counts as a view
    for round in 1..=3 {
        let listed = blog.get_posts(GetPostsRequest {})?;
        for p in &listed.posts {
            println!("round {round}: {:<6} views={} last={}", p.title, p.view_count, p.last_viewed);
        }
    }

    let contents = std::fs::read_to_string(&path)?;
    println!("\nOn-disk JSON:\n{contents}");

    let _ = std::fs::remove_file(&path);
    Ok(())
}
