//! PPTX package writer implementation.
//!
//! A .pptx file is a ZIP archive of XML parts. The fixed parts (content
//! types, relationships, theme, blank master and layout) are templates; the
//! presentation part and each slide are generated per deck. The whole
//! archive is assembled in memory and written to disk in one step, so a
//! failed build never leaves a partial file behind.

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer as XmlWriter;
use versedeck_core::{
    CanvasSize, Color, DeckWriter, Error, Result, SlideSpec, TextBoxSpec, VerticalAnchor,
};
use zip::write::FileOptions;
use zip::ZipWriter;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const REL_TYPE_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_TYPE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

/// Root package relationships pointing at the presentation part.
const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

/// Black slide master with no placeholder shapes.
const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="000000"/></a:solidFill><a:effectLst/></p:bgPr></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#;

const SLIDE_MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#;

/// Blank layout; every slide carries its own background and text boxes.
const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

const SLIDE_LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;

/// Every slide uses the single blank layout.
const SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#;

/// Minimal Office theme. Required by the package structure even though every
/// slide overrides colors and fonts explicitly.
const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Versedeck"><a:themeElements><a:clrScheme name="Versedeck"><a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F1F1F"/></a:dk2><a:lt2><a:srgbClr val="EEEEEE"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Versedeck"><a:majorFont><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#;

/// Writer for PPTX (Office Open XML) presentation files.
#[derive(Debug, Clone, Default)]
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self
    }

    /// Write a complete .pptx package to any seekable sink.
    pub fn write<W: Write + Seek>(
        &self,
        canvas: CanvasSize,
        slides: &[SlideSpec],
        sink: W,
    ) -> Result<()> {
        let mut zip = ZipWriter::new(sink);
        let options = FileOptions::default();

        let mut add = |name: &str, content: &str| -> Result<()> {
            zip.start_file(name, options)
                .map_err(|e| Error::Zip(format!("Failed to add {}: {}", name, e)))?;
            zip.write_all(content.as_bytes())
                .map_err(|e| Error::Zip(format!("Failed to write {}: {}", name, e)))?;
            Ok(())
        };

        add("[Content_Types].xml", &content_types_xml(slides.len()))?;
        add("_rels/.rels", ROOT_RELS)?;
        add("ppt/presentation.xml", &presentation_xml(canvas, slides.len())?)?;
        add(
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels_xml(slides.len()),
        )?;
        add("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER)?;
        add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            SLIDE_MASTER_RELS,
        )?;
        add("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT)?;
        add(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            SLIDE_LAYOUT_RELS,
        )?;
        add("ppt/theme/theme1.xml", THEME)?;

        for (idx, slide) in slides.iter().enumerate() {
            let n = idx + 1;
            add(&format!("ppt/slides/slide{}.xml", n), &slide_xml(slide)?)?;
            add(&format!("ppt/slides/_rels/slide{}.xml.rels", n), SLIDE_RELS)?;
        }

        zip.finish()
            .map_err(|e| Error::Zip(format!("Failed to finalize archive: {}", e)))?;

        Ok(())
    }
}

impl DeckWriter for PptxWriter {
    fn write_deck(&self, canvas: CanvasSize, slides: &[SlideSpec], path: &Path) -> Result<()> {
        let mut buffer = Cursor::new(Vec::new());
        self.write(canvas, slides, &mut buffer)?;

        fs::write(path, buffer.into_inner())
            .map_err(|e| Error::Write(format!("{}: {}", path.display(), e)))?;

        log::debug!("Wrote {} slides to {}", slides.len(), path.display());

        Ok(())
    }
}

/// Build `[Content_Types].xml` declaring every part in the package.
fn content_types_xml(slide_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
    );

    for n in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            n
        ));
    }

    xml.push_str("</Types>");
    xml
}

/// Build `ppt/_rels/presentation.xml.rels`: rId1 is the master, rId2..
/// are the slides in deck order.
fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );

    xml.push_str(&format!(
        r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
        REL_TYPE_MASTER
    ));

    for n in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            n + 1,
            REL_TYPE_SLIDE,
            n
        ));
    }

    xml.push_str("</Relationships>");
    xml
}

/// Build `ppt/presentation.xml` with the slide list and canvas size in EMU.
fn presentation_xml(canvas: CanvasSize, slide_count: usize) -> Result<String> {
    let mut writer = XmlWriter::new(Cursor::new(Vec::new()));

    write_decl(&mut writer)?;

    let mut root = BytesStart::new("p:presentation");
    root.push_attribute(("xmlns:a", NS_A));
    root.push_attribute(("xmlns:r", NS_R));
    root.push_attribute(("xmlns:p", NS_P));
    write_start(&mut writer, root)?;

    write_start(&mut writer, BytesStart::new("p:sldMasterIdLst"))?;
    let mut master_id = BytesStart::new("p:sldMasterId");
    master_id.push_attribute(("id", "2147483648"));
    master_id.push_attribute(("r:id", "rId1"));
    write_empty(&mut writer, master_id)?;
    write_end(&mut writer, "p:sldMasterIdLst")?;

    write_start(&mut writer, BytesStart::new("p:sldIdLst"))?;
    for n in 1..=slide_count {
        let id = (255 + n).to_string();
        let rid = format!("rId{}", n + 1);
        let mut slide_id = BytesStart::new("p:sldId");
        slide_id.push_attribute(("id", id.as_str()));
        slide_id.push_attribute(("r:id", rid.as_str()));
        write_empty(&mut writer, slide_id)?;
    }
    write_end(&mut writer, "p:sldIdLst")?;

    let cx = canvas.width.emu().to_string();
    let cy = canvas.height.emu().to_string();
    let mut size = BytesStart::new("p:sldSz");
    size.push_attribute(("cx", cx.as_str()));
    size.push_attribute(("cy", cy.as_str()));
    write_empty(&mut writer, size)?;

    let mut notes_size = BytesStart::new("p:notesSz");
    notes_size.push_attribute(("cx", "6858000"));
    notes_size.push_attribute(("cy", "9144000"));
    write_empty(&mut writer, notes_size)?;

    write_end(&mut writer, "p:presentation")?;

    into_string(writer)
}

/// Build one `ppt/slides/slideN.xml` part.
fn slide_xml(slide: &SlideSpec) -> Result<String> {
    let mut writer = XmlWriter::new(Cursor::new(Vec::new()));

    write_decl(&mut writer)?;

    let mut root = BytesStart::new("p:sld");
    root.push_attribute(("xmlns:a", NS_A));
    root.push_attribute(("xmlns:r", NS_R));
    root.push_attribute(("xmlns:p", NS_P));
    write_start(&mut writer, root)?;

    write_start(&mut writer, BytesStart::new("p:cSld"))?;

    write_background(&mut writer, slide.background)?;

    write_start(&mut writer, BytesStart::new("p:spTree"))?;
    write_start(&mut writer, BytesStart::new("p:nvGrpSpPr"))?;
    let mut group_props = BytesStart::new("p:cNvPr");
    group_props.push_attribute(("id", "1"));
    group_props.push_attribute(("name", ""));
    write_empty(&mut writer, group_props)?;
    write_empty(&mut writer, BytesStart::new("p:cNvGrpSpPr"))?;
    write_empty(&mut writer, BytesStart::new("p:nvPr"))?;
    write_end(&mut writer, "p:nvGrpSpPr")?;
    write_empty(&mut writer, BytesStart::new("p:grpSpPr"))?;

    for (idx, text_box) in slide.boxes.iter().enumerate() {
        // Shape id 1 is the group; shapes start at 2
        write_text_box(&mut writer, text_box, idx + 2)?;
    }

    write_end(&mut writer, "p:spTree")?;
    write_end(&mut writer, "p:cSld")?;

    write_start(&mut writer, BytesStart::new("p:clrMapOvr"))?;
    write_empty(&mut writer, BytesStart::new("a:masterClrMapping"))?;
    write_end(&mut writer, "p:clrMapOvr")?;

    write_end(&mut writer, "p:sld")?;

    into_string(writer)
}

/// Emit the full-bleed solid background fill.
fn write_background<W: Write>(writer: &mut XmlWriter<W>, color: Color) -> Result<()> {
    write_start(writer, BytesStart::new("p:bg"))?;
    write_start(writer, BytesStart::new("p:bgPr"))?;
    write_solid_fill(writer, "a:solidFill", color)?;
    write_empty(writer, BytesStart::new("a:effectLst"))?;
    write_end(writer, "p:bgPr")?;
    write_end(writer, "p:bg")?;
    Ok(())
}

/// Emit one `<p:sp>` text box shape with its geometry and paragraphs.
fn write_text_box<W: Write>(
    writer: &mut XmlWriter<W>,
    text_box: &TextBoxSpec,
    shape_id: usize,
) -> Result<()> {
    write_start(writer, BytesStart::new("p:sp"))?;

    write_start(writer, BytesStart::new("p:nvSpPr"))?;
    let id = shape_id.to_string();
    let name = format!("TextBox {}", shape_id - 1);
    let mut shape_props = BytesStart::new("p:cNvPr");
    shape_props.push_attribute(("id", id.as_str()));
    shape_props.push_attribute(("name", name.as_str()));
    write_empty(writer, shape_props)?;
    let mut text_box_flag = BytesStart::new("p:cNvSpPr");
    text_box_flag.push_attribute(("txBox", "1"));
    write_empty(writer, text_box_flag)?;
    write_empty(writer, BytesStart::new("p:nvPr"))?;
    write_end(writer, "p:nvSpPr")?;

    write_start(writer, BytesStart::new("p:spPr"))?;
    write_start(writer, BytesStart::new("a:xfrm"))?;
    let x = text_box.left.emu().to_string();
    let y = text_box.top.emu().to_string();
    let mut offset = BytesStart::new("a:off");
    offset.push_attribute(("x", x.as_str()));
    offset.push_attribute(("y", y.as_str()));
    write_empty(writer, offset)?;
    let cx = text_box.width.emu().to_string();
    let cy = text_box.height.emu().to_string();
    let mut extent = BytesStart::new("a:ext");
    extent.push_attribute(("cx", cx.as_str()));
    extent.push_attribute(("cy", cy.as_str()));
    write_empty(writer, extent)?;
    write_end(writer, "a:xfrm")?;
    let mut geometry = BytesStart::new("a:prstGeom");
    geometry.push_attribute(("prst", "rect"));
    write_start(writer, geometry)?;
    write_empty(writer, BytesStart::new("a:avLst"))?;
    write_end(writer, "a:prstGeom")?;
    write_empty(writer, BytesStart::new("a:noFill"))?;
    write_end(writer, "p:spPr")?;

    write_start(writer, BytesStart::new("p:txBody"))?;
    let mut body = BytesStart::new("a:bodyPr");
    body.push_attribute(("wrap", "square"));
    body.push_attribute((
        "anchor",
        match text_box.anchor {
            VerticalAnchor::Top => "t",
            VerticalAnchor::Center => "ctr",
        },
    ));
    write_empty(writer, body)?;
    write_empty(writer, BytesStart::new("a:lstStyle"))?;

    for line in text_box.text.split('\n') {
        write_paragraph(writer, line, text_box)?;
    }

    write_end(writer, "p:txBody")?;
    write_end(writer, "p:sp")?;
    Ok(())
}

/// Emit one centered paragraph carrying the box's font properties.
fn write_paragraph<W: Write>(
    writer: &mut XmlWriter<W>,
    line: &str,
    text_box: &TextBoxSpec,
) -> Result<()> {
    write_start(writer, BytesStart::new("a:p"))?;

    let size = text_box.font.size.centipoints().to_string();

    let mut para_props = BytesStart::new("a:pPr");
    para_props.push_attribute(("algn", "ctr"));
    if let Some(spacing) = text_box.line_spacing {
        // Percentage in thousandths: 1.5 -> 150000
        let pct_val = ((spacing as f64) * 100000.0).round() as i64;
        let pct_val = pct_val.to_string();
        write_start(writer, para_props)?;
        write_start(writer, BytesStart::new("a:lnSpc"))?;
        let mut pct = BytesStart::new("a:spcPct");
        pct.push_attribute(("val", pct_val.as_str()));
        write_empty(writer, pct)?;
        write_end(writer, "a:lnSpc")?;
        write_end(writer, "a:pPr")?;
    } else {
        write_empty(writer, para_props)?;
    }

    if line.is_empty() {
        let mut end_props = BytesStart::new("a:endParaRPr");
        end_props.push_attribute(("lang", "en-US"));
        end_props.push_attribute(("sz", size.as_str()));
        write_empty(writer, end_props)?;
    } else {
        write_start(writer, BytesStart::new("a:r"))?;

        let mut run_props = BytesStart::new("a:rPr");
        run_props.push_attribute(("lang", "en-US"));
        run_props.push_attribute(("sz", size.as_str()));
        run_props.push_attribute(("dirty", "0"));
        write_start(writer, run_props)?;
        write_solid_fill(writer, "a:solidFill", text_box.font.color)?;
        let mut latin = BytesStart::new("a:latin");
        latin.push_attribute(("typeface", text_box.font.family.as_str()));
        write_empty(writer, latin)?;
        write_end(writer, "a:rPr")?;

        write_start(writer, BytesStart::new("a:t"))?;
        writer
            .write_event(Event::Text(BytesText::new(line)))
            .map_err(xml_err)?;
        write_end(writer, "a:t")?;

        write_end(writer, "a:r")?;
    }

    write_end(writer, "a:p")?;
    Ok(())
}

/// Emit `<wrapper><a:srgbClr val="RRGGBB"/></wrapper>`.
fn write_solid_fill<W: Write>(writer: &mut XmlWriter<W>, wrapper: &str, color: Color) -> Result<()> {
    write_start(writer, BytesStart::new(wrapper))?;
    let hex = color.hex();
    let mut srgb = BytesStart::new("a:srgbClr");
    srgb.push_attribute(("val", hex.as_str()));
    write_empty(writer, srgb)?;
    write_end(writer, wrapper)?;
    Ok(())
}

fn write_decl<W: Write>(writer: &mut XmlWriter<W>) -> Result<()> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)
}

fn write_start<W: Write>(writer: &mut XmlWriter<W>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(element)).map_err(xml_err)
}

fn write_empty<W: Write>(writer: &mut XmlWriter<W>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Empty(element)).map_err(xml_err)
}

fn write_end<W: Write>(writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)
}

fn into_string(writer: XmlWriter<Cursor<Vec<u8>>>) -> Result<String> {
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Error::Xml(format!("Generated XML is not UTF-8: {}", e)))
}

fn xml_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Xml(e.to_string())
}
