use std::borrow::Cow;
use std::path::Path;

use memchr::memmem;

use crate::entity::Entity;
use crate::error::Result;
use crate::graph::Graph;

const HEAD_CLOSE: &str = "</head>";
const BODY_CLOSE: &str = "</body>";

/// The slug of the HTML page at `path`: its file name without the final
/// extension, as in `people/jane-doe.html` → `jane-doe`.
pub fn slug_for(path: &Path) -> Option<&str> {
    path.file_stem()?.to_str()
}

/// Makes serialized JSON safe to embed in a `<script>` element by turning
/// every `</` into `<\/`.
///
/// ```rust
/// use ldgraph::inject::escape_for_script;
///
/// assert_eq!(escape_for_script(r#"{"a": "</script>"}"#), r#"{"a": "<\/script>"}"#);
/// assert_eq!(escape_for_script("a < / b"), "a < / b");
/// ```
pub fn escape_for_script(json: &str) -> Cow<'_, str> {
    match memmem::find(json.as_bytes(), b"</") {
        Some(_) => Cow::Owned(json.replace("</", "<\\/")),
        None => Cow::Borrowed(json),
    }
}

/// The `application/ld+json` script block for `entity`.
pub fn script_block(entity: &Entity) -> Result<String> {
    let json = entity.to_json()?;
    Ok(format!("\n<script type=\"application/ld+json\">\n{}\n</script>\n", escape_for_script(&json)))
}

/// Inserts `block` before the first `</head>` of `html` or, failing that,
/// before the first `</body>`. Returns `None` when neither tag is present.
pub fn insert_block(html: &str, block: &str) -> Option<String> {
    let bytes = html.as_bytes();
    let at = memmem::find(bytes, HEAD_CLOSE.as_bytes())
        .or_else(|| memmem::find(bytes, BODY_CLOSE.as_bytes()))?;

    let mut output = String::with_capacity(html.len() + block.len());
    output.push_str(&html[..at]);
    output.push_str(block);
    output.push_str(&html[at..]);
    Some(output)
}

/// Injects the JSON-LD script block for the entity indexed under `slug` into
/// `html`.
///
/// `html` is returned unchanged when `enabled` is false, when no entity is
/// indexed under `slug`, or when it has neither `</head>` nor `</body>`.
/// There is no duplicate detection: injecting twice inserts two blocks.
pub fn inject<'a>(html: &'a str, slug: &str, graph: &Graph, enabled: bool) -> Result<Cow<'a, str>> {
    if !enabled {
        return Ok(Cow::Borrowed(html));
    }

    let Some(entity) = graph.lookup(slug) else {
        return Ok(Cow::Borrowed(html));
    };

    let block = script_block(entity)?;
    match insert_block(html, &block) {
        Some(output) => Ok(Cow::Owned(output)),
        None => {
            tracing::debug!(slug, "no </head> or </body> to inject before");
            Ok(Cow::Borrowed(html))
        }
    }
}
