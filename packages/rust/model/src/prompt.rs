//! The fixed extraction instruction and its JSON schema.

use serde_json::json;

/// Keys of the response object, in schema order.
pub const LABEL_KEYS: [&str; 4] = ["title", "author", "background", "interpretation"];

/// JSON schema of the expected response: four nullable strings, all
/// required, nothing else.
pub fn label_schema() -> serde_json::Value {
    let nullable_string = json!({ "type": ["string", "null"] });
    json!({
        "type": "object",
        "properties": {
            "title": nullable_string,
            "author": nullable_string,
            "background": nullable_string,
            "interpretation": nullable_string,
        },
        "required": LABEL_KEYS,
        "additionalProperties": false,
    })
}

/// Build the extraction prompt around the full label text.
pub fn build_prompt(label_text: &str) -> String {
    format!(
        "You are reading the text of a museum or gallery label placed next to an artwork.\n\
         Extract these fields and answer with one JSON object:\n\
         - title: the title of the artwork, without surrounding quotes\n\
         - author: the artist's name only, without birth or death dates\n\
         - background: historical context or a description of the work\n\
         - interpretation: how to read or appreciate the work\n\
         Use null for any field the label does not provide.\n\
         Answer with the JSON object only, no other text.\n\
         \n\
         Label text:\n\
         {label_text}\n"
    )
}
