use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

#[utoipa::path(
    get,
    path = "/",
    tag = "public",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html", body = String)
    )
)]
pub async fn landing() -> Html<&'static str> {
    Html(INDEX_HTML)
}
