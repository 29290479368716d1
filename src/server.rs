//! HTTP transport: one `POST /blog.Blog/<method>` route per [`Blog`] method.
//!
//! Requests run on tokio's blocking pool, so calls from different clients
//! execute concurrently against the same service.

use crate::error::{Error, ErrorKind, Result};
use crate::message::{
    method_path, CreatePostRequest, GetPostsRequest, Posts, Status, CREATE_POST, GET_POSTS,
};
use crate::post::Post;
use crate::service::Blog;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::Arc;
use std::thread;

/// Bound listener plus the service it dispatches to.
pub struct Server<B> {
    listener: TcpListener,
    service: Arc<B>,
}

impl<B: Blog + 'static> Server<B> {
    /// Bind to `addr`. Failure here is the one error a process can't serve past.
    pub fn bind(addr: impl ToSocketAddrs, service: B) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener,
            service: Arc::new(service),
        })
    }

    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve on a fresh multi-threaded runtime until the listener fails.
    pub fn serve(self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run())
    }

    /// Serve on the current runtime.
    pub async fn run(self) -> Result<()> {
        log::info!("listening on {}", self.local_addr()?);
        let listener = tokio::net::TcpListener::from_std(self.listener)?;
        axum::serve(listener, router(self.service)).await?;
        Ok(())
    }

    /// Run [`serve`](Self::serve) on a background thread and return the bound
    /// address.
    pub fn spawn(self) -> Result<SocketAddr> {
        let addr = self.local_addr()?;
        thread::spawn(move || {
            if let Err(e) = self.serve() {
                log::error!("server stopped: {e}");
            }
        });
        Ok(addr)
    }
}

impl<B> std::fmt::Debug for Server<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("addr", &self.listener.local_addr().ok())
            .finish_non_exhaustive()
    }
}

/// Route table for `service`. Paths other than the known methods answer
/// `Unimplemented`.
pub fn router<B: Blog + 'static>(service: Arc<B>) -> Router {
    Router::new()
        .route(&method_path(GET_POSTS), post(get_posts::<B>))
        .route(&method_path(CREATE_POST), post(create_post::<B>))
        .fallback(unknown_method)
        .with_state(service)
}

async fn get_posts<B: Blog + 'static>(
    State(service): State<Arc<B>>,
    body: std::result::Result<Json<GetPostsRequest>, JsonRejection>,
) -> std::result::Result<Json<Posts>, ApiError> {
    let Json(req) = body.map_err(malformed)?;
    log::debug!("dispatching {GET_POSTS}");
    let posts = blocking(move || service.get_posts(req)).await?;
    Ok(Json(posts))
}

async fn create_post<B: Blog + 'static>(
    State(service): State<Arc<B>>,
    body: std::result::Result<Json<CreatePostRequest>, JsonRejection>,
) -> std::result::Result<Json<Post>, ApiError> {
    let Json(req) = body.map_err(malformed)?;
    log::debug!("dispatching {CREATE_POST}");
    let post = blocking(move || service.create_post(req)).await?;
    Ok(Json(post))
}

async fn unknown_method(uri: Uri) -> ApiError {
    let method = uri.path().rsplit('/').next().unwrap_or_default();
    ApiError(Error::Unimplemented(format!("method {method} not implemented")))
}

/// Store I/O blocks, so keep it off the async workers.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(res) => res,
        Err(e) => Err(Error::internal(Error::Io(format!(
            "request handler failed: {e}"
        )))),
    }
}

fn malformed(rejection: JsonRejection) -> ApiError {
    ApiError(Error::InvalidRequest(format!(
        "malformed request: {}",
        rejection.body_text()
    )))
}

/// An [`Error`] rendered as an HTTP failure with a [`Status`] body.
#[derive(Debug)]
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match self.0.kind() {
            ErrorKind::Unimplemented => StatusCode::NOT_IMPLEMENTED,
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (code, Json(Status::from(&self.0))).into_response()
    }
}
