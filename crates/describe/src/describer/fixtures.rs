//! Hand-built files for describer tests.

use std::io::Cursor;

/// A minimal PDF with one page per entry. `Some(text)` draws the text in
/// Helvetica; `None` gives a page with only a line on it and no text.
pub(crate) fn pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let kids: Vec<String> = (0..pages.len()).map(|n| format!("{} 0 R", 4 + n * 2)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
    ];
    for (n, text) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + n * 2
        ));
        let content = match text {
            Some(text) => format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET"),
            None => "72 720 m 540 720 l S".to_string(),
        };
        objects.push(format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }
    let xref = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!("trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n", objects.len() + 1).as_bytes(),
    );
    out
}

/// A black JPEG carrying an EXIF APP1 segment with only a `Model` tag.
pub(crate) fn jpeg_with_model(width: u32, height: u32, model: &str) -> Vec<u8> {
    let mut jpeg = Vec::new();
    image::RgbImage::new(width, height).write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg).unwrap();

    let mut value = model.as_bytes().to_vec();
    value.push(0);
    assert!(value.len() > 4, "short models are stored inline, which this fixture does not do");
    // Big-endian TIFF header, then IFD0 at offset 8 with a single entry.
    let mut tiff = b"MM\x00\x2a\x00\x00\x00\x08".to_vec();
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0110u16.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&u32::try_from(value.len()).unwrap().to_be_bytes());
    // Header (8) + entry count (2) + one entry (12) + next IFD offset (4).
    tiff.extend_from_slice(&26u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());
    tiff.extend_from_slice(&value);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&u16::try_from(payload.len() + 2).unwrap().to_be_bytes());
    segment.extend_from_slice(&payload);
    // Straight after the SOI marker.
    jpeg.splice(2..2, segment);
    jpeg
}
