use anyhow::{Result, bail};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewDimension {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeComponent {
    #[default]
    None,
    RefviewTitle,
    RefviewFooter,
    RefviewLocalBranchesHeader,
    RefviewRemoteBranchesHeader,
    RefviewTagsHeader,
    RefviewLocalBranch,
    RefviewRemoteBranch,
    RefviewTag,
    SearchMatch,
}

pub trait RenderWindow {
    fn view_dimensions(&self) -> ViewDimension;

    fn rows(&self) -> usize {
        self.view_dimensions().rows
    }

    /// Writes `text` to `row_index`, skipping the first `start_column` characters.
    fn set_row(
        &mut self,
        row_index: usize,
        start_column: usize,
        component: ThemeComponent,
        text: &str,
    ) -> Result<()>;

    fn set_selected_row(&mut self, row_index: usize, active: bool) -> Result<()>;

    fn draw_border(&mut self);

    fn set_title(&mut self, component: ThemeComponent, title: &str) -> Result<()>;

    fn set_footer(&mut self, component: ThemeComponent, footer: &str) -> Result<()>;

    fn highlight(&mut self, pattern: &str, component: ThemeComponent) -> Result<()>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowLine {
    pub text: String,
    pub component: ThemeComponent,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    pub pattern: String,
    pub component: ThemeComponent,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub row_index: usize,
    pub active: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Window {
    dimension: ViewDimension,
    lines: Vec<WindowLine>,
    selection: Option<Selection>,
    border: bool,
    title: Option<WindowLine>,
    footer: Option<WindowLine>,
    highlight: Option<Highlight>,
}

impl Window {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            dimension: ViewDimension { rows, cols },
            lines: vec![WindowLine::default(); rows],
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[WindowLine] {
        &self.lines
    }

    /// Content rows, without the border rows.
    pub fn content(&self) -> &[WindowLine] {
        let end = self.lines.len().saturating_sub(1);
        self.lines.get(1..end).unwrap_or_default()
    }

    pub fn line_text(&self, row_index: usize) -> Option<&str> {
        self.lines.get(row_index).map(|l| l.text.as_str())
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    pub fn title(&self) -> Option<&WindowLine> {
        self.title.as_ref()
    }

    pub fn footer(&self) -> Option<&WindowLine> {
        self.footer.as_ref()
    }

    pub fn highlight_pattern(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    fn check_row(&self, row_index: usize) -> Result<()> {
        if row_index >= self.dimension.rows {
            bail!(
                "invalid row index {} (window has {} rows)",
                row_index,
                self.dimension.rows
            );
        }
        Ok(())
    }
}

impl RenderWindow for Window {
    fn view_dimensions(&self) -> ViewDimension {
        self.dimension
    }

    fn set_row(
        &mut self,
        row_index: usize,
        start_column: usize,
        component: ThemeComponent,
        text: &str,
    ) -> Result<()> {
        self.check_row(row_index)?;
        let width = self.dimension.cols.saturating_sub(2);
        self.lines[row_index] = WindowLine {
            text: text.chars().skip(start_column).take(width).collect(),
            component,
        };
        Ok(())
    }

    fn set_selected_row(&mut self, row_index: usize, active: bool) -> Result<()> {
        self.check_row(row_index)?;
        self.selection = Some(Selection { row_index, active });
        Ok(())
    }

    fn draw_border(&mut self) {
        self.border = true;
    }

    fn set_title(&mut self, component: ThemeComponent, title: &str) -> Result<()> {
        self.title = Some(WindowLine {
            text: title.to_string(),
            component,
        });
        Ok(())
    }

    fn set_footer(&mut self, component: ThemeComponent, footer: &str) -> Result<()> {
        self.footer = Some(WindowLine {
            text: footer.to_string(),
            component,
        });
        Ok(())
    }

    fn highlight(&mut self, pattern: &str, component: ThemeComponent) -> Result<()> {
        if pattern.is_empty() {
            bail!("empty highlight pattern");
        }
        self.highlight = Some(Highlight {
            pattern: pattern.to_string(),
            component,
        });
        Ok(())
    }
}
