//! Landing page handler.

use axum::response::Html;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>urlsnap</title>
</head>
<body>
  <h1>urlsnap</h1>
  <p>Paste a URL, get a short link back.</p>
  <form id="shorten-form">
    <input id="url" type="text" size="60" placeholder="https://example.com/some/long/path">
    <button type="submit">Shorten</button>
  </form>
  <p id="outcome"></p>
  <script>
    document.getElementById("shorten-form").addEventListener("submit", async (event) => {
      event.preventDefault();
      const url = document.getElementById("url").value;
      const response = await fetch("/", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(url),
      });
      const body = await response.json();
      const outcome = document.getElementById("outcome");
      if (body.result) {
        outcome.innerHTML = `<a href="${body.url}">${body.url}</a>`;
      } else {
        outcome.textContent = body.error;
      }
    });
  </script>
</body>
</html>
"#;

/// Serves the landing page with the shorten form.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
