use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::config::CurrencyFormat;
use crate::form::{Field, FormEvent, FormState};
use crate::format::format_currency;
use crate::loan::LoanResult;
use crate::shell::StateObserver;
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Form(FormEvent),
    Quit,
}

/// Translate a key press into what it means for the form.
pub fn map_key(key: KeyEvent, state: &FormState) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let current = state.fields.get(state.focus);

    let event = match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('l') if ctrl => FormEvent::Clear,
        KeyCode::Char(c) if !ctrl => FormEvent::Edit(state.focus, format!("{current}{c}")),
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop()?;
            FormEvent::Edit(state.focus, value)
        }
        KeyCode::Tab | KeyCode::Down => FormEvent::FocusNext,
        KeyCode::BackTab | KeyCode::Up => FormEvent::FocusPrev,
        KeyCode::Enter => FormEvent::Calculate,
        _ => return None,
    };
    Some(Action::Form(event))
}

/// Redraws the whole screen on every state transition.
pub struct TerminalView<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    currency: &'a CurrencyFormat,
}

impl<'a, B: Backend> TerminalView<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, currency: &'a CurrencyFormat) -> Self {
        Self { terminal, currency }
    }
}

impl<B: Backend> StateObserver for TerminalView<'_, B> {
    fn on_transition(&mut self, state: &FormState) -> Result<()> {
        let currency = self.currency;
        self.terminal.draw(|f| ui(f, state, currency))?;
        Ok(())
    }
}

pub fn ui(f: &mut Frame, state: &FormState, currency: &CurrencyFormat) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("Equated Monthly Instalment (EMI) Calculator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    for (field, area) in Field::ALL.into_iter().zip(&chunks[1..4]) {
        render_input(f, *area, state, field, currency);
    }

    let button = Paragraph::new("[ Calculate EMI ]")
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, chunks[4]);

    if let Some(err) = state.error() {
        render_error(f, chunks[5], err);
    } else if let Some(result) = state.result() {
        render_results(f, chunks[5], result, currency);
    }

    let help = Paragraph::new(
        "Tab/↓: next field | Shift+Tab/↑: previous | Enter: calculate | Ctrl+L: clear | Esc: exit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[6]);
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    state: &FormState,
    field: Field,
    currency: &CurrencyFormat,
) {
    let focused = state.focus == field;
    let value = state.fields.get(field);

    let text = match field {
        Field::Principal => format!("{}{value}", currency.symbol),
        Field::AnnualRate => format!("{value}%"),
        Field::Tenure => format!("{value} months"),
    };
    let (style, border) = if focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default().fg(Color::DarkGray), Style::default())
    };

    let marker = if focused { "▶ " } else { "  " };
    let input = Paragraph::new(format!("{marker}{text}")).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(field.label()),
    );
    f.render_widget(input, area);
}

fn render_error(f: &mut Frame, area: Rect, err: &ValidationError) {
    let message = Paragraph::new(err.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Invalid input"),
        );
    f.render_widget(message, area);
}

fn render_results(f: &mut Frame, area: Rect, result: &LoanResult, currency: &CurrencyFormat) {
    let rows = [
        ("Total Loan Amount (P): ", result.principal, Color::White),
        ("Equated Monthly Instalment (EMI): ", result.installment, Color::Cyan),
        ("Total Interest to be Paid: ", result.total_interest, Color::Yellow),
        ("Total Payment (P + Interest): ", result.total_payment, Color::Green),
    ];

    let text: Vec<Line> = rows
        .into_iter()
        .map(|(label, amount, color)| {
            Line::from(vec![
                Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format_currency(amount, currency), Style::default().fg(color)),
            ])
        })
        .collect();

    let results = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .alignment(Alignment::Left);
    f.render_widget(results, area);
}
