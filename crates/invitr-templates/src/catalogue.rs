use crate::svg::{Frame, Motif, Texture};
use crate::{Catalogue, Template};

use Motif::*;
use Texture::*;

/// (title, colours, texture, motif, style)
type Design = (&'static str, [&'static str; 2], Texture, Motif, &'static str);

const PLAIN_WHITE_FRAME: &str = "data:image/svg+xml,%3Csvg width='100%25' height='100%25' xmlns='http://www.w3.org/2000/svg'%3E%3Crect width='100%25' height='100%25' fill='white'/%3E%3C/svg%3E";

const BIRTHDAY: [Design; 10] = [
    ("Midnight Blue", ["#0a192f", "#64ffda"], Noise, AbstractShapes, "Modern"),
    ("Electric Purple", ["#4c1d95", "#c4b5fd"], Noise, Dots, "Party"),
    ("Neon Pink", ["#be185d", "#fbcfe8"], Gradient, AbstractShapes, "Fun"),
    ("Deep Teal", ["#134e4a", "#2dd4bf"], Paper, BorderGold, "Elegant"),
    ("Sunset Orange", ["#c2410c", "#fdba74"], Gradient, Dots, "Warm"),
    ("Royal Gold", ["#78350f", "#fcd34d"], Noise, BorderGold, "Luxury"),
    ("Charcoal Minimal", ["#18181b", "#e4e4e7"], Paper, AbstractShapes, "Modern"),
    ("Ruby Red", ["#991b1b", "#fecaca"], Gradient, Dots, "Bold"),
    ("Forest Green", ["#14532d", "#86efac"], Noise, Floral, "Nature"),
    ("Ocean Depth", ["#1e3a8a", "#60a5fa"], Gradient, Watercolor, "Cool"),
];

const WEDDING: [Design; 10] = [
    ("Royal Navy Gold", ["#0a192f", "#ffd700"], Noise, BorderGold, "Luxury"),
    ("Emerald Velvet", ["#064e3b", "#d1fae5"], Paper, Floral, "Elegant"),
    ("Burgundy Wine", ["#450a0a", "#fecaca"], Paper, BorderGold, "Romantic"),
    ("Charcoal & Gold", ["#111827", "#fde68a"], Noise, BorderGold, "Modern"),
    ("Deep Plum", ["#4c1d95", "#ddd6fe"], Paper, Floral, "Majestic"),
    ("Black Tie", ["#000000", "#ffffff"], Noise, BorderGold, "Formal"),
    ("Midnight Star", ["#1e1b4b", "#e0e7ff"], Gradient, Dots, "Celestial"),
    ("Rich Chocolate", ["#3f2c22", "#f5d0b0"], Paper, BorderGold, "Vintage"),
    ("Sapphire Night", ["#172554", "#bfdbfe"], Noise, Watercolor, "Blue"),
    ("Crimson Love", ["#7f1d1d", "#fca5a5"], Paper, Floral, "Passion"),
];

const ANNIVERSARY: [Design; 8] = [
    ("Golden 50th", ["#000000", "#ffd700"], Gradient, BorderGold, "Luxury"),
    ("Silver 25th", ["#1f2937", "#e5e7eb"], Gradient, BorderGold, "Classic"),
    ("Ruby 40th", ["#881337", "#fb7185"], Noise, Watercolor, "Romantic"),
    ("Sapphire 45th", ["#1e3a8a", "#93c5fd"], Paper, BorderGold, "Blue"),
    ("Emerald 55th", ["#065f46", "#6ee7b7"], Paper, Floral, "Green"),
    ("Bronze 8th", ["#451a03", "#fdba74"], Noise, Dots, "Warm"),
    ("Pearl 30th", ["#374151", "#f9fafb"], Paper, Dots, "Elegant"),
    ("Diamond 60th", ["#0f172a", "#38bdf8"], Gradient, AbstractShapes, "Modern"),
];

const BABY: [Design; 8] = [
    ("Vibrant Yellow", ["#fbbf24", "#fffbeb"], Gradient, Dots, "Bright"),
    ("Deep Sky Blue", ["#0284c7", "#bae6fd"], Paper, AbstractShapes, "Boy"),
    ("Hot Pink Pop", ["#db2777", "#fbcfe8"], Noise, Watercolor, "Girl"),
    ("Lush Jungle", ["#15803d", "#86efac"], Paper, Leaves, "Safari"),
    ("Purple Play", ["#7c3aed", "#ddd6fe"], Gradient, Dots, "Fun"),
    ("Orange Zest", ["#ea580c", "#fed7aa"], Noise, Watercolor, "Energy"),
    ("Teal Toybox", ["#0d9488", "#99f6e4"], Paper, Grid, "Modern"),
    ("Navy Night", ["#172554", "#fde047"], Gradient, Stars, "Sleepy"),
];

/// Accumulates one category, numbering entries by position.
struct Category {
    prefix: &'static str,
    templates: Vec<Template>,
}

impl Category {
    fn new(name: &'static str) -> Self {
        Self {
            prefix: &name[..3],
            templates: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.templates.len()
    }

    fn push(&mut self, title: &str, style: &str, colors: &[&str], texture: Option<Texture>, motif: Motif) {
        let frame = Frame {
            colors,
            texture,
            motif: Some(motif),
        };
        let id = format!(
            "{}_{}_{}",
            self.prefix,
            self.len(),
            title.to_lowercase().replace(' ', "_")
        );
        self.templates.push(Template {
            id,
            title: title.to_string(),
            style: style.to_string(),
            text: default_text(title),
            image: String::new(),
            frame: frame.data_uri(),
        });
    }

    fn push_designs(&mut self, designs: &[Design]) {
        for (title, colors, texture, motif, style) in designs {
            self.push(title, style, colors, Some(*texture), *motif);
        }
    }
}

fn default_text(title: &str) -> String {
    format!(
        "JOIN US FOR A\n{}\n\n{{{{host_name}}}}\n\n{{{{event_date}}}} @ {{{{event_time}}}}\n{{{{venue}}}}",
        title.to_uppercase()
    )
}

/// Builds the full catalogue: birthday 25, wedding 25, anniversary 20 and
/// baby 20 designs. The only plain white design is the first birthday one.
pub fn generate_catalogue() -> Catalogue {
    let mut birthday = Category::new("birthday");
    birthday.templates.push(Template {
        id: "bday_clean_white".to_string(),
        title: "Clean Minimalist".to_string(),
        style: "Minimal".to_string(),
        text: "BIRTHDAY\n{{host_name}}\n{{event_date}}".to_string(),
        image: String::new(),
        frame: PLAIN_WHITE_FRAME.to_string(),
    });
    birthday.push_designs(&BIRTHDAY);
    for i in 0..14 {
        let hue = (i * 30) % 360;
        let base = format!("hsl({hue}, 70%, 40%)");
        let accent = format!("hsl({hue}, 70%, 80%)");
        birthday.push(&format!("Vibrant Party {}", i + 1), "Fun", &[base.as_str(), accent.as_str()], None, Dots);
    }

    let mut wedding = Category::new("wedding");
    wedding.push_designs(&WEDDING);
    for i in 0..15 {
        wedding.push(
            &format!("Luxury Wedding {}", i + 1),
            "Formal",
            &["#1a1a1a", "#d4af37"],
            None,
            BorderGold,
        );
    }

    let mut anniversary = Category::new("anniversary");
    anniversary.push_designs(&ANNIVERSARY);
    while anniversary.len() < 20 {
        let title = format!("Anniversary Gala {}", anniversary.len());
        anniversary.push(&title, "Elegant", &["#2c2c2c", "#fff"], None, BorderGold);
    }

    let mut baby = Category::new("baby");
    baby.push_designs(&BABY);
    while baby.len() < 20 {
        let title = format!("Baby Shower Fun {}", baby.len());
        baby.push(&title, "Cute", &["#0ea5e9", "#fff"], None, Dots);
    }

    Catalogue {
        birthday: birthday.templates,
        wedding: wedding.templates,
        anniversary: anniversary.templates,
        baby: baby.templates,
    }
}
