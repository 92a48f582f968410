//! PDF Document wrapper

use crate::font::StandardFont;
use crate::graphics::{generate_line_operators, generate_rect_operators, PaintContext, RectStyle};
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::text::{calculate_x_offset, generate_text_operators, wrap_text, TextRenderContext};
use crate::{Align, PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// PDF Document built from scratch and drawn into page by page
///
/// Drawing calls only buffer content operators. Page content streams and
/// resource dictionaries are written once, when the document is serialized.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root `Pages` node
    pages_id: ObjectId,
    /// Page object IDs in order
    page_ids: Vec<ObjectId>,
    /// Size used for every page
    page_size: PageSize,
    /// Current font
    current_font: StandardFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Current fill color for shapes
    current_fill_color: Color,
    /// Current stroke color for shapes
    current_stroke_color: Color,
    /// Current stroke width in points
    current_line_width: f32,
    /// Resource name per font (e.g. "F1")
    font_resources: BTreeMap<StandardFont, String>,
    /// Fonts referenced per page (page number -> fonts)
    page_fonts: HashMap<usize, Vec<StandardFont>>,
    /// Embedded images (data hash -> object ID, width, height)
    embedded_images: HashMap<u64, (ObjectId, u32, u32)>,
    /// Page image resources (page number -> image name -> object ID)
    page_image_resources: HashMap<usize, BTreeMap<String, ObjectId>>,
    /// Next image resource number
    next_image_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    /// Create a document with one blank page
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::new(PageSize::A4);
    /// assert_eq!(doc.page_count(), 1);
    /// ```
    pub fn new(page_size: PageSize) -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.new_object_id();
        let catalog_id = inner.add_object(Object::Dictionary(lopdf::dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }));
        inner.trailer.set("Root", catalog_id);

        let mut doc = Self {
            inner,
            pages_id,
            page_ids: Vec::new(),
            page_size,
            current_font: StandardFont::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            current_fill_color: Color::white(),
            current_stroke_color: Color::black(),
            current_line_width: 0.5,
            font_resources: BTreeMap::new(),
            page_fonts: HashMap::new(),
            embedded_images: HashMap::new(),
            page_image_resources: HashMap::new(),
            next_image_resource: 1,
            page_content_buffer: HashMap::new(),
        };
        doc.add_blank_page();
        doc
    }

    /// Append a blank page and return its number (1-indexed)
    pub fn add_blank_page(&mut self) -> usize {
        let contents_id = self
            .inner
            .add_object(Object::Stream(Stream::new(Dictionary::new(), vec![])));

        let page_id = self.inner.add_object(Object::Dictionary(lopdf::dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.page_size.width as f32),
                Object::Real(self.page_size.height as f32),
            ],
            "Resources" => Dictionary::new(),
            "Contents" => contents_id,
        }));
        self.page_ids.push(page_id);

        self.write_pages_node();
        self.page_ids.len()
    }

    /// Rewrite the `Pages` node from the current page list
    fn write_pages_node(&mut self) {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        self.inner.objects.insert(
            self.pages_id,
            Object::Dictionary(lopdf::dictionary! {
                "Type" => "Pages",
                "Count" => self.page_ids.len() as i64,
                "Kids" => kids,
            }),
        );
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Page size shared by every page
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Set the text color
    ///
    /// # Example
    /// ```ignore
    /// doc.set_text_color(Color::white());
    /// doc.set_text_color(Color::from_rgb(255, 128, 0)); // Orange
    /// ```
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the fill color used by `draw_rect`
    pub fn set_fill_color(&mut self, color: Color) {
        self.current_fill_color = color;
    }

    /// Set the stroke color used by `draw_rect` and `draw_line`
    pub fn set_stroke_color(&mut self, color: Color) {
        self.current_stroke_color = color;
    }

    /// Set the stroke width in points
    pub fn set_line_width(&mut self, width: f32) {
        self.current_line_width = width;
    }

    /// Width of `text` in the current font and size, in points
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font
            .text_width_points(text, self.current_font_size) as f64
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    fn paint_context(&self) -> PaintContext {
        PaintContext {
            fill: self.current_fill_color,
            stroke: self.current_stroke_color,
            line_width: self.current_line_width,
        }
    }

    /// Draw a rectangle
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `x` - Left edge in points
    /// * `y` - Top edge in points (from top)
    /// * `width` - Width in points
    /// * `height` - Height in points
    /// * `style` - Fill, stroke or both
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: RectStyle,
    ) -> Result<()> {
        self.check_page(page)?;

        let valid = [x, y, width, height].iter().all(|v| v.is_finite());
        if !valid || width < 0.0 || height < 0.0 {
            return Err(PdfError::InvalidGeometry(format!(
                "rectangle {x},{y} {width}x{height}"
            )));
        }

        let pdf_y = self.page_size.height - y - height;
        let operators =
            generate_rect_operators(x, pdf_y, width, height, style, &self.paint_context());
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a straight line between two points (y from top)
    pub fn draw_line(&mut self, page: usize, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.check_page(page)?;

        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(PdfError::InvalidGeometry(format!(
                "line {x1},{y1} -> {x2},{y2}"
            )));
        }

        let height = self.page_size.height;
        let operators =
            generate_line_operators(x1, height - y1, x2, height - y2, &self.paint_context());
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X anchor in points; left end, center or right end depending on `align`
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.check_page(page)?;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        if !x.is_finite() || !y.is_finite() {
            return Err(PdfError::InvalidGeometry(format!("text position {x},{y}")));
        }

        let text_width = self.get_text_width(text);
        let start_x = match align {
            Align::Left => x,
            Align::Center => x - text_width / 2.0,
            Align::Right => x - text_width,
        };

        let font_resource_name = self.get_or_create_font_ref(self.current_font, page);
        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            color: self.current_text_color,
        };

        let literal = self.current_font.encode_literal(text);
        let operators =
            generate_text_operators(&literal, start_x, self.page_size.height - y, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Insert text wrapped to a box width
    ///
    /// Lines are aligned within `[x, x + width]`; the first baseline sits at
    /// `y` and each following one `line_height` lower.
    ///
    /// # Returns
    /// Number of lines drawn
    #[allow(clippy::too_many_arguments)]
    pub fn insert_text_box(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        align: Align,
        line_height: f64,
    ) -> Result<usize> {
        if !(width.is_finite() && width > 0.0) {
            return Err(PdfError::InvalidGeometry(format!(
                "text box width {width}"
            )));
        }

        let lines = wrap_text(self.current_font, self.current_font_size, text, width);
        for (i, line) in lines.iter().enumerate() {
            let offset = calculate_x_offset(self.get_text_width(line), width, align);
            self.insert_text(
                line,
                page,
                x + offset,
                y + i as f64 * line_height,
                Align::Left,
            )?;
        }

        Ok(lines.len())
    }

    /// Insert an image with scaling mode
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate of the top edge in points (from top)
    /// * `width` - Target width in points
    /// * `height` - Target height in points
    /// * `mode` - Scaling mode
    ///
    /// # Returns
    /// The (width, height) actually occupied, in points
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<(f64, f64)> {
        self.check_page(page)?;

        let (image_resource_name, orig_width, orig_height) =
            self.get_or_create_image_ref(data, page)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        let pdf_y = self.page_size.height - y - actual_height;
        let operators =
            generate_image_operators(&image_resource_name, x, pdf_y, actual_width, actual_height);
        self.buffer_content(page, &operators);

        Ok((actual_width, actual_height))
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Write the document to any writer
    pub fn write_to<W: Write>(&mut self, target: &mut W) -> Result<()> {
        self.finalize()?;
        self.inner
            .save_to(target)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Flush buffered content and write page resources
    fn finalize(&mut self) -> Result<()> {
        self.flush_content_buffers()?;

        let font_ids: BTreeMap<StandardFont, ObjectId> = self
            .font_resources
            .keys()
            .map(|font| (*font, self.inner.add_object(font.to_pdf_object())))
            .collect();

        for page in 1..=self.page_count() {
            let mut font_dict = Dictionary::new();
            for font in self.page_fonts.get(&page).into_iter().flatten() {
                font_dict.set(
                    self.font_resources[font].as_bytes(),
                    Object::Reference(font_ids[font]),
                );
            }

            let mut xobject_dict = Dictionary::new();
            for (name, id) in self.page_image_resources.get(&page).into_iter().flatten() {
                xobject_dict.set(name.as_bytes(), Object::Reference(*id));
            }

            let mut resources = Dictionary::new();
            resources.set("Font", Object::Dictionary(font_dict));
            resources.set("XObject", Object::Dictionary(xobject_dict));

            let page_id = self.page_id(page)?;
            let mut page_dict = self
                .inner
                .get_object(page_id)?
                .as_dict()
                .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?
                .clone();
            page_dict.set("Resources", Object::Dictionary(resources));
            self.inner.objects.insert(page_id, page_dict.into());
        }

        Ok(())
    }

    fn page_id(&self, page: usize) -> Result<ObjectId> {
        self.page_ids
            .get(page.wrapping_sub(1))
            .copied()
            .ok_or(PdfError::InvalidPage(page, self.page_ids.len()))
    }

    /// Get or create a font resource name for a page
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams
    fn get_or_create_font_ref(&mut self, font: StandardFont, page: usize) -> String {
        let next = self.font_resources.len() + 1;
        let resource_name = self
            .font_resources
            .entry(font)
            .or_insert_with(|| format!("F{next}"))
            .clone();

        let fonts = self.page_fonts.entry(page).or_default();
        if !fonts.contains(&font) {
            fonts.push(font);
        }

        resource_name
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1", "Im2") and original dimensions.
    /// Images are deduplicated by hash of their data.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        let cached = self.embedded_images.get(&data_hash).copied();
        let (object_id, width, height) = match cached {
            Some(entry) => entry,
            None => {
                let xobject = ImageXObject::from_bytes(data)?;
                let object_id = self.inner.add_object(xobject.to_pdf_stream());
                let entry = (object_id, xobject.width, xobject.height);
                self.embedded_images.insert(data_hash, entry);
                entry
            }
        };

        let page_resources = self.page_image_resources.entry(page).or_default();
        if let Some((name, _)) = page_resources.iter().find(|(_, id)| **id == object_id) {
            return Ok((name.clone(), width, height));
        }

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        page_resources.insert(resource_name.clone(), object_id);

        Ok((resource_name, width, height))
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Append all buffered content to the page content streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();

        for (page, content) in buffers {
            if content.is_empty() {
                continue;
            }

            let page_id = self.page_id(page)?;
            let mut page_dict = self
                .inner
                .get_object(page_id)?
                .as_dict()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?
                .clone();

            let mut new_content = match page_dict.get(b"Contents") {
                Ok(Object::Reference(id)) => match self.inner.get_object(*id) {
                    Ok(Object::Stream(stream)) => stream.content.clone(),
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            };
            new_content.extend_from_slice(&content);

            let stream_id = self
                .inner
                .add_object(Stream::new(Dictionary::new(), new_content));
            page_dict.set("Contents", Object::Reference(stream_id));
            self.inner.objects.insert(page_id, page_dict.into());
        }

        Ok(())
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}
