use anyhow::Result;
use invitr_types::api::GuestResponse;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

use crate::guests::{GuestRecord, HEADERS};

const SHEET_NAME: &str = "Guest List";
const HEADER_FILL: u32 = 0x4F81BD;
const MAX_COLUMN_WIDTH: usize = 50;

/// Workbook bytes with one "Guest List" sheet.
pub fn export_guests_xlsx(guests: &[GuestResponse]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center);

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, guest) in guests.iter().enumerate() {
        let row = i as u32 + 1;
        let record = GuestRecord::from(guest);
        for (col, value) in record.cells().iter().enumerate() {
            if col == 4 {
                sheet.write_number(row, col as u16, record.plus_ones as f64)?;
            } else {
                sheet.write_string(row, col as u16, value)?;
            }
            widths[col] = widths[col].max(value.chars().count());
        }
    }

    for (col, width) in widths.into_iter().enumerate() {
        sheet.set_column_width(col as u16, (width + 2).min(MAX_COLUMN_WIDTH) as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guests::tests::guest;

    #[test]
    fn produces_zip_container() {
        let bytes = export_guests_xlsx(&[guest("Ada", Some("ada@example.com"))]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
