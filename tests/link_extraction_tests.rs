//! Link-annotation extraction against a hand-assembled fixture document.
//!
//! The fixture is a minimal three-page PDF written object-by-object with a
//! correct xref table: page 1 has no annotations, page 2 carries two URI
//! link annotations, page 3 carries one internal (non-URI) link. These
//! tests bind the real PDF engine, so they only run where a pdfium
//! library is installed.

use pagepress::{Artifact, extract_links, merge_pdfs};

/// Assemble the fixture PDF, tracking byte offsets for the xref table.
fn fixture_pdf() -> Vec<u8> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>",
        "<< /Type /Pages /Kids [3 0 R 4 0 R 5 0 R] /Count 3 >>",
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>",
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Annots [6 0 R 7 0 R] >>",
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Annots [8 0 R] >>",
        "<< /Type /Annot /Subtype /Link /Rect [10 700 110 720] /Border [0 0 0] \
         /A << /Type /Action /S /URI /URI (https://example.com/first) >> >>",
        "<< /Type /Annot /Subtype /Link /Rect [10 650 110 670] /Border [0 0 0] \
         /A << /Type /Action /S /URI /URI (https://example.com/second) >> >>",
        "<< /Type /Annot /Subtype /Link /Rect [10 600 110 620] /Border [0 0 0] \
         /Dest [3 0 R /Fit] >>",
    ];

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_pos = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

#[test]
#[ignore = "requires a pdfium library on the host"]
fn uri_links_are_collected_with_their_source_page() {
    let fixture = Artifact::from_bytes("pdf", &fixture_pdf()).unwrap();

    let links = extract_links(&fixture).unwrap();

    // Two URI links, both on page 2, in stored order; the internal link on
    // page 3 is skipped
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].page_num, 2);
    assert_eq!(links[0].uri, "https://example.com/first");
    assert_eq!(links[1].page_num, 2);
    assert_eq!(links[1].uri, "https://example.com/second");

    fixture.delete();
}

#[test]
#[ignore = "requires a pdfium library on the host"]
fn duplicate_links_are_preserved_across_a_merge() {
    let fixture = Artifact::from_bytes("pdf", &fixture_pdf()).unwrap();
    let copy = Artifact::from_bytes("pdf", &fixture_pdf()).unwrap();

    let merged = merge_pdfs(&[fixture.clone(), copy.clone()]).unwrap();
    let links = extract_links(&merged).unwrap();

    // Pages concatenate in list order: the second document's link page is
    // page 5, and nothing is deduplicated
    assert_eq!(links.len(), 4);
    assert_eq!(links[0].page_num, 2);
    assert_eq!(links[2].page_num, 5);
    assert_eq!(links[0].uri, links[2].uri);

    fixture.delete();
    copy.delete();
    merged.delete();
}
