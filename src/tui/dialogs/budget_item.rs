//! Budget item entry dialog
//!
//! Modal form for adding a budget item: category, subcategory, payment type,
//! and amount. The subcategory choices are derived from the selected
//! category; picking a category always resets the chosen subcategory.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Category, NewBudgetItem, PaymentType};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the item form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemField {
    #[default]
    Category,
    Subcategory,
    PaymentType,
    Amount,
}

impl ItemField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Category => Self::Subcategory,
            Self::Subcategory => Self::PaymentType,
            Self::PaymentType => Self::Amount,
            Self::Amount => Self::Category,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Category => Self::Amount,
            Self::Subcategory => Self::Category,
            Self::PaymentType => Self::Subcategory,
            Self::Amount => Self::PaymentType,
        }
    }
}

/// State for the budget item form dialog
#[derive(Debug, Clone)]
pub struct BudgetItemFormState {
    /// Currently focused field
    pub focused_field: ItemField,

    /// Selected category; nothing is selected when the form opens
    pub category: Option<Category>,

    /// Subcategory choices for the selected category; empty until a
    /// category is chosen
    pub subcategory_choices: &'static [&'static str],

    /// Index into `subcategory_choices`
    pub selected_subcategory: Option<usize>,

    /// Selected payment type
    pub payment_type: Option<PaymentType>,

    /// Amount input
    pub amount_input: TextInput,

    /// Error message to display
    pub error_message: Option<String>,
}

impl Default for BudgetItemFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetItemFormState {
    /// Create an empty form
    pub fn new() -> Self {
        Self {
            focused_field: ItemField::Category,
            category: None,
            subcategory_choices: &[],
            selected_subcategory: None,
            payment_type: None,
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            error_message: None,
        }
    }

    /// Select a category: replaces the subcategory choices and resets the
    /// chosen subcategory. `None` empties the choices.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.selected_subcategory = None;
        self.subcategory_choices = match category {
            Some(c) => c.subcategories(),
            None => &[],
        };
    }

    /// Cycle through the categories
    pub fn cycle_category(&mut self, delta: i32) {
        let all = Category::all();
        let next = match self.category {
            None => {
                if delta >= 0 {
                    all[0]
                } else {
                    all[all.len() - 1]
                }
            }
            Some(current) => {
                let pos = all.iter().position(|c| *c == current).unwrap_or(0) as i32;
                let len = all.len() as i32;
                all[(pos + delta).rem_euclid(len) as usize]
            }
        };
        self.set_category(Some(next));
    }

    /// Cycle through the subcategory choices of the current category
    pub fn cycle_subcategory(&mut self, delta: i32) {
        let len = self.subcategory_choices.len() as i32;
        if len == 0 {
            self.selected_subcategory = None;
            return;
        }
        let next = match self.selected_subcategory {
            None => {
                if delta >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(current) => (current as i32 + delta).rem_euclid(len),
        };
        self.selected_subcategory = Some(next as usize);
    }

    /// Cycle through the payment types
    pub fn cycle_payment_type(&mut self, delta: i32) {
        let all = PaymentType::all();
        let next = match self.payment_type {
            None => {
                if delta >= 0 {
                    all[0]
                } else {
                    all[all.len() - 1]
                }
            }
            Some(current) => {
                let pos = all.iter().position(|p| *p == current).unwrap_or(0) as i32;
                let len = all.len() as i32;
                all[(pos + delta).rem_euclid(len) as usize]
            }
        };
        self.payment_type = Some(next);
    }

    /// The chosen subcategory, if any
    pub fn subcategory(&self) -> Option<&'static str> {
        self.selected_subcategory
            .and_then(|i| self.subcategory_choices.get(i).copied())
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.amount_input.focused = self.focused_field == ItemField::Amount;
    }

    /// Build a candidate item from the form, or explain what is missing.
    /// All four fields are mandatory.
    pub fn build_candidate(&self) -> Result<NewBudgetItem, String> {
        let category = self.category.ok_or("Select a category")?;
        let subcategory = self.subcategory().ok_or("Select a subcategory")?;
        let payment_type = self.payment_type.ok_or("Select a payment type")?;

        let amount_str = self.amount_input.value().trim();
        if amount_str.is_empty() {
            return Err("Enter an amount".into());
        }
        let amount: f64 = amount_str
            .parse()
            .map_err(|_| "Amount must be a number".to_string())?;

        let candidate = NewBudgetItem::new(category, subcategory, payment_type, amount);
        candidate.validate().map_err(|e| e.to_string())?;
        Ok(candidate)
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the budget item dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(48, 12, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Budget Item ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category
            Constraint::Length(1), // Subcategory
            Constraint::Length(1), // Payment type
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.item_form;

    render_select(
        frame,
        chunks[0],
        "Category",
        form.category.map(|c| c.as_str()).unwrap_or("Select Category"),
        form.focused_field == ItemField::Category,
    );
    render_select(
        frame,
        chunks[1],
        "Subcategory",
        form.subcategory().unwrap_or("Select Subcategory"),
        form.focused_field == ItemField::Subcategory,
    );
    render_select(
        frame,
        chunks[2],
        "Payment Type",
        form.payment_type
            .map(|p| p.as_str())
            .unwrap_or("Select Payment Type"),
        form.focused_field == ItemField::PaymentType,
    );

    frame.render_widget(&form.amount_input, chunks[3]);

    if let Some(error) = &form.error_message {
        let error_line = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(error_line, chunks[5]);
    }

    let hints = Paragraph::new("Tab: next field  ←/→: change  Enter: save  Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, chunks[6]);
}

/// Render a cycling select field as `Label: < value >`
fn render_select(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw(": "),
        Span::styled(if focused { "< " } else { "  " }, value_style),
        Span::styled(value.to_string(), value_style),
        Span::styled(if focused { " >" } else { "  " }, value_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
