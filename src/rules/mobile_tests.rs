use super::*;

fn check(path: &str, src: &str) -> Vec<Issue> {
    let checker = MobileChecker::new(Vec::new()).unwrap();
    checker.check(&ScanTarget::from_content(path, src))
}

const DOCUMENT_OK: &str = "<Html lang=\"en\">\n  <Head>\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n  </Head>\n</Html>";

#[test]
fn next_images_without_sizes() {
    let src = "import Image from 'next/image';\n\n<Image src={hero} alt=\"\" fill />\n<Image src={card} alt=\"\" sizes=\"(max-width: 768px) 100vw, 33vw\" />";
    let issues = check("components/Hero.tsx", src);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "image-sizes");
    assert_eq!(issues[0].criterion, "Mobile Performance");
    assert_eq!(issues[0].line, Some(3));
}

#[test]
fn image_components_from_elsewhere_are_ignored() {
    let src = "import { Image } from '@/components/ui';\n<Image src={hero} />";
    assert!(check("components/Hero.tsx", src).is_empty());
}

#[test]
fn document_shell_needs_viewport_meta() {
    let issues = check("pages/_document.tsx", "<Html lang=\"en\">\n  <Head />\n</Html>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "viewport-meta");
    assert!(check("pages/_document.tsx", DOCUMENT_OK).is_empty());
}

#[test]
fn small_root_font_size() {
    let css = "html {\n  font-size: 14px;\n}";
    let issues = check("styles/globals.css", css);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "base-font-size");
    assert!(issues[0].message.contains("14px"));
    assert_eq!(issues[0].line, Some(1));
}

#[test]
fn readable_or_nested_font_sizes_pass() {
    assert!(check("styles/globals.css", "body { margin: 0; font-size: 16px; }").is_empty());
    assert!(check("styles/card.css", ".card-body { font-size: 12px; }").is_empty());
    // Inline styles in components are not the document root.
    assert!(check("components/Note.tsx", "const css = `body { font-size: 10px; }`;").is_empty());
}
