use crate::core::timesheet::{COLUMNS, Timesheet};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

/// Header lines are wrapped at this many characters.
const HEADER_WRAP: usize = 95;

/// Timesheet grid column widths on an A4 page with 40pt margins.
const TIMESHEET_WIDTHS: [f32; 6] = [75.0, 70.0, 80.0, 70.0, 70.0, 150.0];

/// Text as WinAnsi bytes; characters outside Latin-1 become `?`.
pub(crate) fn pdf_text(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u32 as u8 } else { b'?' })
        .collect()
}

/// Rough Helvetica advance, good enough for centering and column sizing.
fn text_width(s: &str, size: f32) -> f32 {
    s.chars().count() as f32 * size * 0.5
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            row_h: 20.0,

            next_id,
            font_id,
            bold_font_id,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    #[cfg(test)]
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);

            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, self.font_id);
            fonts.pair(FONT_BOLD, self.bold_font_id);
        }

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text_with(
        &self,
        content: &mut Content,
        font: Name<'_>,
        x: f32,
        y: f32,
        size: f32,
        text: &str,
    ) {
        let bytes = pdf_text(text);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        self.draw_text_with(content, FONT_REGULAR, x, y, size, text);
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_band(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, grey: f32) {
        content.save_state();
        content.set_fill_rgb(grey, grey, grey);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_line(&self, content: &mut Content, x1: f32, y1: f32, x2: f32, y2: f32) {
        content.save_state();
        content.set_line_width(0.8);
        content.move_to(x1, y1);
        content.line_to(x2, y2);
        content.stroke();
        content.restore_state();
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        row_h: f32,
        col_widths: &[f32],
        x_start: f32,
        row: &[String],
        font: Name<'_>,
        font_size: f32,
    ) {
        let mut x = x_start;
        let text_y = y + (row_h - font_size) / 2.0 + 1.5;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            self.draw_text_with(content, font, x + 4.0, text_y, font_size, text);
            self.draw_cell_borders(content, x, y, w, row_h);
            x += w;
        }
    }

    /// Column widths from header and content, scaled down to fit the page.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.chars().count() as f32 * 6.5 + 8.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                let w = (cell.chars().count() as f32 * 6.2 + 8.0).max(widths[i]);
                widths[i] = w;
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text_with(
            content,
            FONT_BOLD,
            self.margin,
            self.page_h - self.margin + 10.0,
            self.title_font_size,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 25.0,
            self.font_size,
            &pg,
        );
    }

    /// Multi-page table with a title on each page.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;

            self.fill_band(&mut content, self.margin, y, table_w, self.row_h, 0.87);
            self.draw_row(
                &mut content,
                y,
                self.row_h,
                &col_widths,
                self.margin,
                &header_row,
                FONT_BOLD,
                self.header_font_size,
            );
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, self.margin, y, table_w, self.row_h, 0.96);
                }
                self.draw_row(
                    &mut content,
                    y,
                    self.row_h,
                    &col_widths,
                    self.margin,
                    row,
                    FONT_REGULAR,
                    self.font_size,
                );
                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            // an empty table still gets one page with its header
            if remaining.is_empty() {
                break;
            }
        }
    }

    /// One A4 attendance page: optional header text, title, employee box,
    /// day grid and signature lines.
    pub fn write_timesheet(&mut self, sheet: &Timesheet) {
        let mut content = self.new_page();
        let left = self.margin;
        let right = self.page_w - self.margin;
        let mut y = self.page_h - self.margin;

        for line in &sheet.header_lines {
            for wrapped in textwrap::wrap(line, HEADER_WRAP) {
                y -= 11.0;
                self.draw_text(&mut content, left, y, 9.0, &wrapped);
            }
        }
        if !sheet.header_lines.is_empty() {
            y -= 8.0;
        }

        let title = "INDIVIDUAL ATTENDANCE SHEET";
        y -= 20.0;
        let title_x = (self.page_w - text_width(title, self.title_font_size)) / 2.0;
        self.draw_text_with(&mut content, FONT_BOLD, title_x, y, self.title_font_size, title);

        // employee box
        let box_h = 48.0;
        y -= 10.0 + box_h;
        self.fill_band(&mut content, left, y, right - left, box_h, 0.95);
        self.draw_cell_borders(&mut content, left, y, right - left, box_h);

        let emp = &sheet.employee;
        let col2 = left + (right - left) / 2.0;
        let info = [
            (
                format!("Employee: {}", emp.name),
                format!("Registration: {}", emp.registration),
            ),
            (
                format!("Role: {}", emp.role),
                format!("Shift: {}", emp.shift.label()),
            ),
            (
                format!("Month: {}", sheet.month_name()),
                format!("Year: {}", sheet.year),
            ),
        ];
        let mut line_y = y + box_h - 14.0;
        for (a, b) in &info {
            self.draw_text(&mut content, left + 8.0, line_y, self.font_size, a);
            self.draw_text(&mut content, col2 + 8.0, line_y, self.font_size, b);
            line_y -= 14.0;
        }

        // day grid, sized so a 31-day month fits above the signatures
        y -= 14.0;
        let signature_space = 70.0;
        let available = y - self.margin - signature_space;
        let row_h = (available / (sheet.rows.len() + 1) as f32).min(self.row_h);
        let table_w: f32 = TIMESHEET_WIDTHS.iter().sum();
        let grid_font = (row_h * 0.5).clamp(6.0, self.font_size);

        y -= row_h;
        let header_row: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
        self.fill_band(&mut content, left, y, table_w, row_h, 0.85);
        self.draw_row(
            &mut content,
            y,
            row_h,
            &TIMESHEET_WIDTHS,
            left,
            &header_row,
            FONT_BOLD,
            grid_font,
        );

        for row in &sheet.rows {
            y -= row_h;
            if row.weekend {
                self.fill_band(&mut content, left, y, table_w, row_h, 0.92);
            }
            self.draw_row(
                &mut content,
                y,
                row_h,
                &TIMESHEET_WIDTHS,
                left,
                &row.cells(),
                FONT_REGULAR,
                grid_font,
            );
        }

        // signatures
        let sig_y = y - 40.0;
        let sig_w = 200.0;
        self.draw_line(&mut content, left, sig_y, left + sig_w, sig_y);
        self.draw_line(&mut content, right - sig_w, sig_y, right, sig_y);
        self.draw_text(&mut content, left, sig_y - 12.0, 9.0, "Employee signature");
        self.draw_text(&mut content, right - sig_w, sig_y - 12.0, 9.0, "Supervisor signature");

        self.finalize_page(content);
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
