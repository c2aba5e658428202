use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes left unescaped in frame URIs: alphanumerics and `_ . - ~ /`.
const FRAME_URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

const DATA_URI_PREFIX: &str = "data:image/svg+xml,";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Texture {
    /// Heavier grain over the base colour.
    Paper,
    Noise,
    /// Diagonal two-stop gradient from the first to the second colour.
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motif {
    Floral,
    Watercolor,
    BorderGold,
    Grid,
    Dots,
    AbstractShapes,
    Leaves,
    Stars,
}

/// A background design. `colors[0]` is the base, the rest are accents.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub colors: &'a [&'a str],
    pub texture: Option<Texture>,
    pub motif: Option<Motif>,
}

impl Frame<'_> {
    fn color(&self, idx: usize, fallback: &'static str) -> String {
        self.colors
            .get(idx)
            .or_else(|| self.colors.first())
            .map_or(fallback, |c| *c)
            .to_string()
    }

    pub fn to_svg(&self) -> String {
        let mut defs = String::from(FILTER_DEFS);
        let mut content = String::new();
        let base = self.color(0, "#000");

        match self.texture {
            Some(Texture::Paper) => {
                content += &format!(r#"<rect width="100%" height="100%" fill="{base}"/>"#);
                content += r#"<rect width="100%" height="100%" filter="url(#noise)" opacity="0.4"/>"#;
            }
            Some(Texture::Noise) => {
                content += &format!(r#"<rect width="100%" height="100%" fill="{base}"/>"#);
                content += r#"<rect width="100%" height="100%" filter="url(#noise)" opacity="0.3"/>"#;
            }
            Some(Texture::Gradient) => {
                defs += &format!(
                    r#"<linearGradient id="grad1" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" stop-color="{base}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
                    self.color(1, "#000")
                );
                content += r#"<rect width="100%" height="100%" fill="url(#grad1)"/>"#;
            }
            None => content += &format!(r#"<rect width="100%" height="100%" fill="{base}"/>"#),
        }

        match self.motif {
            Some(Motif::Floral) => {
                let petal = self.color(1, "#ffeb3b");
                defs += &format!(
                    r#"<radialGradient id="petal" cx="50%" cy="50%" r="50%" fx="50%" fy="50%"><stop offset="0%" stop-color="{petal}" stop-opacity="0.9"/><stop offset="100%" stop-color="{petal}" stop-opacity="0"/></radialGradient>"#
                );
                content += r#"<g transform="translate(-20,-20) scale(1.5)"><circle cx="50" cy="50" r="30" fill="url(#petal)" opacity="0.9"/><circle cx="80" cy="40" r="20" fill="url(#petal)" opacity="0.7"/><path d="M50,50 Q80,20 100,50 T150,50" stroke="rgba(255,255,255,0.3)" stroke-width="3" fill="none"/></g>"#;
                content += r#"<g transform="translate(calc(100% - 100px), calc(100% - 100px)) scale(1.5) rotate(180 50 50)"><circle cx="50" cy="50" r="30" fill="url(#petal)" opacity="0.9"/></g>"#;
            }
            Some(Motif::Watercolor) => {
                let first = self.color(1, "#ff0055");
                let second = self.color(2, "#00ccff");
                defs += &format!(
                    r#"<radialGradient id="splash1" cx="30%" cy="30%" r="40%"><stop offset="0%" stop-color="{first}" stop-opacity="0.8"/><stop offset="100%" stop-color="{first}" stop-opacity="0"/></radialGradient><radialGradient id="splash2" cx="70%" cy="80%" r="50%"><stop offset="0%" stop-color="{second}" stop-opacity="0.7"/><stop offset="100%" stop-color="{first}" stop-opacity="0"/></radialGradient>"#
                );
                content += &format!(r#"<rect width="100%" height="100%" fill="{base}"/>"#);
                content += r#"<circle cx="30%" cy="30%" r="200" fill="url(#splash1)" filter="url(#watercolor)"/><circle cx="80%" cy="80%" r="250" fill="url(#splash2)" filter="url(#watercolor)"/>"#;
            }
            Some(Motif::BorderGold) => {
                content += r#"<rect x="20" y="20" width="calc(100% - 40px)" height="calc(100% - 40px)" fill="none" stroke="url(#gold-grad)" stroke-width="6"/><rect x="15" y="15" width="calc(100% - 30px)" height="calc(100% - 30px)" fill="none" stroke="url(#gold-grad)" stroke-width="2" opacity="0.7"/>"#;
            }
            Some(Motif::Grid) => content += r#"<rect width="100%" height="100%" fill="url(#grid)"/>"#,
            Some(Motif::Dots) => content += r#"<rect width="100%" height="100%" fill="url(#dots)"/>"#,
            Some(Motif::AbstractShapes) => {
                let accent = self.color(1, "#000");
                content += &format!(
                    r#"<circle cx="10%" cy="10%" r="150" fill="{accent}" opacity="0.9"/><circle cx="90%" cy="90%" r="200" fill="{accent}" opacity="0.8"/><rect x="80%" y="10%" width="100" height="100" transform="rotate(45)" fill="rgba(255,255,255,0.15)"/>"#
                );
            }
            Some(Motif::Leaves) => {
                content += r##"<path d="M0,0 C20,50 80,50 100,100" stroke="#4a6741" stroke-width="2" fill="none" opacity="0.3"/>"##;
            }
            Some(Motif::Stars) => {
                let star = self.color(1, "#fff");
                for (cx, cy, r) in [(12, 18, 3), (35, 8, 2), (68, 15, 3), (88, 30, 2), (20, 70, 2), (80, 85, 3)] {
                    content += &format!(r#"<circle cx="{cx}%" cy="{cy}%" r="{r}" fill="{star}" opacity="0.8"/>"#);
                }
            }
            None => {}
        }

        format!(
            r#"<svg width="100%" height="100%" xmlns="http://www.w3.org/2000/svg"><defs>{defs}{PATTERN_DEFS}</defs>{content}</svg>"#
        )
    }

    /// The SVG as a percent-encoded `data:` URI usable as a CSS background.
    pub fn data_uri(&self) -> String {
        encode_svg(&self.to_svg())
    }
}

pub fn encode_svg(svg: &str) -> String {
    format!("{DATA_URI_PREFIX}{}", utf8_percent_encode(svg, FRAME_URI))
}

const FILTER_DEFS: &str = r##"<filter id="noise" x="0%" y="0%" width="100%" height="100%"><feTurbulence type="fractalNoise" baseFrequency="0.65" numOctaves="3" stitchTiles="stitch"/><feColorMatrix type="matrix" values="1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 0.1 0"/></filter><filter id="gold-foil"><feTurbulence type="fractalNoise" baseFrequency="0.2" numOctaves="3" result="noise"/><feDiffuseLighting in="noise" lighting-color="#ffd700" surfaceScale="3"><feDistantLight azimuth="45" elevation="60"/></feDiffuseLighting><feComposite operator="in" in2="SourceGraphic"/></filter><filter id="watercolor" x="-20%" y="-20%" width="140%" height="140%"><feTurbulence type="fractalNoise" baseFrequency="0.03" numOctaves="3" seed="1"/><feDisplacementMap in="SourceGraphic" scale="20"/><feGaussianBlur stdDeviation="5"/></filter>"##;

const PATTERN_DEFS: &str = r##"<pattern id="grid" width="40" height="40" patternUnits="userSpaceOnUse"><path d="M 40 0 L 0 0 0 40" fill="none" stroke="rgba(255,255,255,0.1)" stroke-width="1"/></pattern><pattern id="dots" width="20" height="20" patternUnits="userSpaceOnUse"><circle cx="2" cy="2" r="1.5" fill="rgba(255,255,255,0.2)"/></pattern><linearGradient id="gold-grad" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" stop-color="#bf953f"/><stop offset="25%" stop-color="#fcf6ba"/><stop offset="50%" stop-color="#b38728"/><stop offset="75%" stop-color="#fbf5b7"/><stop offset="100%" stop-color="#aa771c"/></linearGradient>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_a_url_component() {
        let uri = encode_svg(r##"<svg fill="#fff" d="a b/c"/>"##);
        assert_eq!(uri, "data:image/svg+xml,%3Csvg%20fill%3D%22%23fff%22%20d%3D%22a%20b/c%22/%3E");
    }

    #[test]
    fn gradient_uses_both_colours() {
        let frame = Frame {
            colors: &["#be185d", "#fbcfe8"],
            texture: Some(Texture::Gradient),
            motif: Some(Motif::AbstractShapes),
        };
        let svg = frame.to_svg();
        assert!(svg.contains(r##"stop-color="#be185d""##));
        assert!(svg.contains(r##"fill="#fbcfe8" opacity="0.9""##));
        assert!(frame.data_uri().starts_with("data:image/svg+xml,%3Csvg"));
    }

    #[test]
    fn single_colour_doubles_as_accent() {
        let frame = Frame {
            colors: &["#123456"],
            texture: None,
            motif: Some(Motif::AbstractShapes),
        };
        assert!(frame.to_svg().contains(r##"<circle cx="10%" cy="10%" r="150" fill="#123456""##));
    }
}
