//! Static assets served by the review UI.

/// Stylesheet for the review surface.
pub const STYLE_CSS: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
    background: #f4f4f2;
    color: #1c1c1c;
}
#main-header {
    background: #1c1c1c;
    color: #fff;
    padding: 0.6rem 1.2rem;
}
#main-header .logo {
    color: #fff;
    font-weight: 600;
    text-decoration: none;
}
main {
    max-width: 72rem;
    margin: 0 auto;
    padding: 1.2rem;
}
.panel {
    background: #fff;
    border: 1px solid #ddd;
    border-radius: 4px;
    padding: 1rem;
    margin-bottom: 1rem;
}
.panel h2 {
    margin-top: 0;
    font-size: 1rem;
}
.error {
    background: #fbe9e7;
    border: 1px solid #c62828;
    color: #c62828;
    border-radius: 4px;
    padding: 0.7rem 1rem;
    margin-bottom: 1rem;
}
.hint { color: #666; font-size: 0.85rem; }
.preview img {
    max-width: 100%;
    border: 1px solid #ccc;
}
pre.extracted, pre.raw {
    background: #fafafa;
    border: 1px solid #e0e0e0;
    border-radius: 4px;
    padding: 0.8rem;
    overflow-x: auto;
    white-space: pre-wrap;
}
pre.raw { font-size: 0.8rem; color: #444; }
input[type="text"] {
    width: 24rem;
    max-width: 100%;
    padding: 0.35rem;
}
button {
    padding: 0.4rem 0.9rem;
    background: #1c1c1c;
    color: #fff;
    border: none;
    border-radius: 3px;
    cursor: pointer;
}
"#;
