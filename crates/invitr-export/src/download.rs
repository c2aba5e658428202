//! Relays a client-rendered invitation image back as a named attachment.

use std::str::FromStr;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const FALLBACK_TITLE: &str = "invitation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Png,
    /// Word-compatible HTML wrapper around the PNG.
    Word,
}

impl FromStr for DownloadFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "word" => Ok(Self::Word),
            _ => Err(()),
        }
    }
}

#[derive(Debug)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DownloadFormat {
    /// `image` is base64, optionally with a `data:...;base64,` prefix.
    pub fn render(self, image: &str, title: Option<&str>) -> Result<Attachment> {
        let title = safe_title(title.unwrap_or(FALLBACK_TITLE));
        let png = decode_image(image)?;

        Ok(match self {
            Self::Png => Attachment {
                file_name: format!("{title}.png"),
                content_type: "image/png",
                bytes: png,
            },
            Self::Word => Attachment {
                file_name: format!("{title}.doc"),
                content_type: "application/msword",
                bytes: word_document(&title, &png).into_bytes(),
            },
        })
    }
}

/// Keeps alphanumerics, space, `-` and `_`, then turns spaces into `_`.
pub fn safe_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let cleaned = kept.trim().replace(' ', "_");
    if cleaned.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        cleaned
    }
}

pub fn decode_image(image: &str) -> Result<Vec<u8>> {
    let encoded = image.split_once(',').map_or(image, |(_, data)| data);
    STANDARD.decode(encoded.trim()).context("Image is not valid base64")
}

fn word_document(title: &str, png: &[u8]) -> String {
    format!(
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
         xmlns:w='urn:schemas-microsoft-com:office:word' \
         xmlns='http://www.w3.org/TR/REC-html40'>\n\
         <head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n\
         <body>\n<div style=\"text-align: center; width: 100%;\">\n\
         <img src=\"data:image/png;base64,{data}\" style=\"width:100%; max-width:650px; height:auto;\">\n\
         </div>\n</body>\n</html>\n",
        data = STANDARD.encode(png),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitises_titles() {
        assert_eq!(safe_title("Ada's 30th Party!"), "Adas_30th_Party");
        assert_eq!(safe_title("  ../..  "), "invitation");
        assert_eq!(safe_title("summer-bash_2025"), "summer-bash_2025");
    }

    #[test]
    fn strips_data_url_prefix() {
        let raw = STANDARD.encode(b"\x89PNG");
        assert_eq!(decode_image(&format!("data:image/png;base64,{raw}")).unwrap(), b"\x89PNG");
        assert_eq!(decode_image(&raw).unwrap(), b"\x89PNG");
        assert!(decode_image("data:image/png;base64,***").is_err());
    }

    #[test]
    fn word_wrapper_embeds_png() {
        let raw = STANDARD.encode(b"png-bytes");
        let attachment = DownloadFormat::Word.render(&raw, Some("Wedding Day")).unwrap();
        assert_eq!(attachment.file_name, "Wedding_Day.doc");
        assert_eq!(attachment.content_type, "application/msword");
        let html = String::from_utf8(attachment.bytes).unwrap();
        assert!(html.contains(&format!("data:image/png;base64,{raw}")));
        assert!(html.contains("<title>Wedding_Day</title>"));
    }

    #[test]
    fn unknown_formats_are_rejected() {
        assert!("pdf".parse::<DownloadFormat>().is_err());
        assert_eq!("png".parse::<DownloadFormat>(), Ok(DownloadFormat::Png));
    }
}
