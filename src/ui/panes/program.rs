//! Program pane: the lexed instruction listing
//!
//! Each row shows the instruction index, its source position, the group and
//! the operation with its parameter. The instruction the program counter
//! points at is highlighted and kept at a fixed visual row while stepping.

use super::utils::{pane_block, visible_rows};
use crate::parser::instruction::{FlowOp, Instruction, Operation};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Scroll state for the program pane
pub struct ProgramScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Data needed to render the program pane
pub struct ProgramRenderData<'a> {
    pub instructions: &'a [Instruction],
    /// Instruction about to execute (`None` once past the end)
    pub current: Option<usize>,
    /// Instruction that raised the runtime error shown at this point in history
    pub error_index: Option<usize>,
}

fn instruction_spans(instruction: &Instruction) -> Vec<Span<'static>> {
    let is_label = instruction.operation == Operation::Flow(FlowOp::Label);
    let op_style = if is_label {
        Style::default()
            .fg(DEFAULT_THEME.label)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.primary)
    };

    let mut spans = vec![
        Span::styled(
            format!("{:<11}", instruction.group().to_string()),
            Style::default().fg(DEFAULT_THEME.group),
        ),
        Span::styled(instruction.operation.name().to_string(), op_style),
    ];

    if let Some(parameter) = &instruction.parameter {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            parameter.to_string(),
            Style::default().fg(if is_label {
                DEFAULT_THEME.label
            } else {
                DEFAULT_THEME.number
            }),
        ));
    }
    spans
}

/// Render the program pane
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    data: ProgramRenderData,
    is_focused: bool,
    scroll_state: &mut ProgramScrollState,
) {
    let block = pane_block(" Program ", is_focused);
    let total_lines = data.instructions.len();

    if total_lines == 0 {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_rows(area.height);

    // Start with the current instruction centred
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if let Some(current) = data.error_index.or(data.current) {
        scroll_state.offset = current.saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = data
        .instructions
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, instruction)| {
            let is_error = data.error_index == Some(idx);
            let is_current = data.current == Some(idx);

            let (marker, num_style, content_style) = if is_error {
                (
                    "✗",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Some(
                        Style::default()
                            .bg(DEFAULT_THEME.error)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                )
            } else if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Some(Style::default().bg(DEFAULT_THEME.current_line_bg)),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment), None)
            };

            let mut spans = vec![
                Span::styled(format!("{}{:4} ", marker, idx), num_style),
                Span::styled(
                    format!("{:>8}  ", instruction.location.to_string()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];
            let mut content = instruction_spans(instruction);
            if let Some(style) = content_style {
                for span in &mut content {
                    span.style = if is_error { style } else { span.style.patch(style) };
                }
            }
            spans.extend(content);

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
