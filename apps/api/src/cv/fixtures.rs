//! Minimal PDF documents for upload tests.
//!
//! Each page is one content stream drawing lines with the standard Helvetica
//! font. Cross-reference offsets are computed while writing, so the output is
//! a well-formed PDF 1.4 file.

/// Two pages: contact block and education on the first, experience and skills
/// on the second.
pub const RESUME_PAGES: &[&[&str]] = &[
    &[
        "Jane Smith",
        "jane.smith@example.com",
        "+1 555 123 4567",
        "linkedin.com/in/janesmith",
        "EDUCATION",
        "BSc Physics, MIT 2019",
    ],
    &["EXPERIENCE", "Engineer at Acme 2019-2024", "SKILLS", "Rust, SQL"],
];

pub fn resume_pdf() -> Vec<u8> {
    build_pdf(RESUME_PAGES)
}

/// Builds a PDF with one page per entry, drawing each line 16pt below the last.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    // 1: catalog, 2: page tree, 3: font, then page/content pairs from 4.
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (i, lines) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        let content = content_stream(lines);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_at = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    ));
    out.into_bytes()
}

fn content_stream(lines: &[&str]) -> String {
    let mut stream = String::from("BT\n/F1 12 Tf\n72 720 Td\n");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            stream.push_str("0 -16 Td\n");
        }
        stream.push_str(&format!("({}) Tj\n", escape(line)));
    }
    stream.push_str("ET");
    stream
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
