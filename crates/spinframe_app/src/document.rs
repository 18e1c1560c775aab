//! Standalone HTML export
//!
//! Wraps the generated keyframes in a fixed presentational page: three
//! stacked gradient squares and a cursor inside a `preserve-3d` container
//! that the animation rotates.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};
use spinframe_animation::{KeyframeExport, ANIMATION_NAME};
use std::fmt;

const PAGE_STYLE: &str = r#"body {
  margin: 0;
  background-color: #ffffff;
  display: flex;
  justify-content: center;
  align-items: center;
  height: 100vh;
}

.animation-container {
  position: relative;
  width: 400px;
  height: 400px;
  transform-style: preserve-3d;
  overflow: visible;
  will-change: transform;
}
"#;

const SHAPE_STYLE: &str = r#".square {
  position: absolute;
  width: 200px;
  height: 200px;
  border-radius: 30px;
  top: 50%;
  left: 50%;
  transform: translate(-50%, -50%) translateZ(0px);
  background: linear-gradient(135deg, var(--color-start), var(--color-end));
}

.front {
  --color-start: #3CAEFF;
  --color-end: #0053C4;
  mix-blend-mode: hard-light;
  transform: translate(-50%, -50%) translateZ(120px);
}

.middle {
  --color-start: #FFD84D;
  --color-end: #FF661A;
  mix-blend-mode: multiply;
  transform: translate(-50%, -50%) translateZ(60px);
}

.back {
  --color-start: #FFF04C;
  --color-end: #FFC812;
  mix-blend-mode: normal;
  transform: translate(-50%, -50%) translateZ(0px);
}

.cursor {
  position: absolute;
  width: 61.5px;
  height: 67px;
  top: 45%;
  left: 45%;
  transform: rotate(315deg) translateZ(140px);
}

.cursorShadow {
  position: absolute;
  width: 61.5px;
  height: 67px;
  top: 45%;
  left: 45%;
  transform: rotate(315deg) translateZ(121px);
}

.cursorShadow img {
  width: 100%;
  height: 100%;
  filter: brightness(0) saturate(100%) blur(4px);
  opacity: 0.1;
}
"#;

/// Page settings of the exported document (`[export]` in `spinframe.toml`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTemplate {
    pub title: String,
    pub lang: String,
    pub animation_name: String,
    /// Image used for the cursor and its shadow
    pub cursor_image: String,
    /// Default output file name
    pub file_name: String,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self {
            title: "Animation".to_string(),
            lang: "en".to_string(),
            animation_name: ANIMATION_NAME.to_string(),
            cursor_image: "Cursor.svg".to_string(),
            file_name: "animation.html".to_string(),
        }
    }
}

impl DocumentTemplate {
    /// Stylesheet embedded in the page: layout, keyframes, shapes
    pub fn stylesheet(&self, export: &KeyframeExport) -> String {
        let mut css = String::from(PAGE_STYLE);
        css.push('\n');
        css.push_str(&export.to_css_named(&self.animation_name));
        css.push('\n');
        css.push_str(SHAPE_STYLE);
        css
    }

    /// Render the full HTML document
    pub fn render(&self, export: &KeyframeExport) -> String {
        Page {
            template: self,
            export,
        }
        .to_string()
    }
}

/// The document markup; attribute values and the title are HTML-escaped
struct Page<'a> {
    template: &'a DocumentTemplate,
    export: &'a KeyframeExport,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template = self.template;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(
            f,
            "<html lang=\"{}\">",
            encode_double_quoted_attribute(&template.lang)
        )?;
        writeln!(f, "<head>")?;
        writeln!(f, "  <meta charset=\"UTF-8\">")?;
        writeln!(f, "  <title>{}</title>", encode_text(&template.title))?;
        writeln!(f, "  <style>")?;
        f.write_str(&template.stylesheet(self.export))?;
        writeln!(f, "  </style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "  <div class=\"animation-container\">")?;
        let image = encode_double_quoted_attribute(&template.cursor_image);
        for class in ["cursor", "cursorShadow"] {
            writeln!(f, "    <div class=\"{}\">", class)?;
            writeln!(
                f,
                "      <img src=\"{}\" alt=\"Cursor\" width=\"125%\" height=\"125%\">",
                image
            )?;
            writeln!(f, "    </div>")?;
        }
        for layer in ["front", "middle", "back"] {
            writeln!(f, "    <div class=\"square {}\"></div>", layer)?;
        }
        writeln!(f, "  </div>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}
