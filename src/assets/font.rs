use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where an outline font came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// Loaded from an explicit file.
    File(PathBuf),
    /// Resolved from the system font database (family name).
    System(String),
}

/// Raw outline font bytes plus the face index inside them.
#[derive(Clone, Debug)]
pub struct OutlineFont {
    /// Provenance, for diagnostics.
    pub origin: FontOrigin,
    /// Font file bytes (TTF/OTF/TTC).
    pub bytes: Arc<Vec<u8>>,
    /// Face index for collections; 0 for single-face files.
    pub index: u32,
}

/// The display face used by metrics and rendering.
#[derive(Clone, Debug)]
pub enum FontFace {
    /// A real outline font.
    Outline(OutlineFont),
    /// Built-in fallback: every non-whitespace glyph is drawn as a filled box with a fixed
    /// advance. Always available.
    Blocks,
}

impl FontFace {
    /// Short human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Self::Outline(f) => match &f.origin {
                FontOrigin::File(p) => format!("file '{}'", p.display()),
                FontOrigin::System(family) => format!("system family '{family}'"),
            },
            Self::Blocks => "built-in block face".to_owned(),
        }
    }
}

/// Load the display face.
///
/// Resolution order: `path` (if given and readable), then the system sans-serif face, then the
/// built-in block face. This never fails; each fallback step is logged.
pub fn load_font(path: Option<&Path>) -> FontFace {
    if let Some(path) = path {
        match std::fs::read(path) {
            Ok(bytes) => {
                tracing::info!(path = %path.display(), "loaded display font");
                return FontFace::Outline(OutlineFont {
                    origin: FontOrigin::File(path.to_path_buf()),
                    bytes: Arc::new(bytes),
                    index: 0,
                });
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not load the custom font, using a default font instead"
                );
            }
        }
    }

    if let Some(font) = system_sans_serif() {
        tracing::info!(font = %FontFace::Outline(font.clone()).describe(), "using fallback font");
        return FontFace::Outline(font);
    }

    tracing::warn!("no system font available, using built-in block face");
    FontFace::Blocks
}

/// Query the system font database for a regular sans-serif face.
pub fn system_sans_serif() -> Option<OutlineFont> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let families = [
        fontdb::Family::Name("Arial"),
        fontdb::Family::SansSerif,
        fontdb::Family::Serif,
        fontdb::Family::Monospace,
    ];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query)?;
    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "sans-serif".to_owned());
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    Some(OutlineFont {
        origin: FontOrigin::System(family),
        bytes: Arc::new(bytes),
        index,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
