//! Four-function calculator.
//!
//! Input is kept as the literal expression typed on the keypad. Pressing `=`
//! evaluates it with ordinary precedence (`*` and `/` before `+` and `-`,
//! left to right otherwise). A bad expression shows `Error` and clears the
//! input; nothing here panics.

use thiserror::Error;
use xlos_render::{Color, Point, Rect, Renderer, RoundedRect, Stroke, TextStyle};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::input::{Key, RawEvent};

const KEYPAD: [[char; 4]; 4] = [
    ['7', '8', '9', '/'],
    ['4', '5', '6', '*'],
    ['1', '2', '3', '-'],
    ['0', '.', '=', '+'],
];
const BUTTON_SIZE: f32 = 50.0;
const BUTTON_GAP: f32 = 10.0;
const MARGIN: f32 = 10.0;
const DISPLAY_HEIGHT: f32 = 50.0;

/// Why an expression could not be evaluated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,

    #[error("malformed expression")]
    Malformed,

    #[error("division by zero")]
    DivisionByZero,
}

/// Evaluate an arithmetic expression over `+ - * /` and decimal numbers.
///
/// A leading `-` on a number is accepted, so a negative result can be
/// edited further.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let mut parser = Parser {
        chars: expression.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    if parser.chars.is_empty() {
        return Err(CalcError::Empty);
    }
    let value = parser.sum()?;
    if parser.pos != parser.chars.len() {
        return Err(CalcError::Malformed);
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Malformed)
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn sum(&mut self) -> Result<f64, CalcError> {
        let mut value = self.product()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.product()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn product(&mut self) -> Result<f64, CalcError> {
        let mut value = self.number()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.number()?;
            value = if op == '*' {
                value * rhs
            } else if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let negative = self.peek() == Some('-');
        if negative {
            self.pos += 1;
        }
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        let value: f64 = literal.parse().map_err(|_| CalcError::Malformed)?;
        Ok(if negative { -value } else { value })
    }
}

/// Render a result without a trailing `.0` or float noise.
pub fn format_number(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        let s = format!("{n:.10}");
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

/// A keypad calculator.
#[derive(Debug, Default)]
pub struct Calculator {
    input: String,
    /// Outcome of the last `=`, shown in place of the input until the next key.
    result: Option<Result<f64, CalcError>>,
}

impl Calculator {
    /// Create a calculator with an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// The text shown in the display.
    pub fn display(&self) -> String {
        match self.result {
            Some(Err(_)) => "Error".to_owned(),
            _ => self.input.clone(),
        }
    }

    /// Apply one keypad button.
    pub fn press(&mut self, label: char) {
        if label == '=' {
            let outcome = evaluate(&self.input);
            tracing::trace!(expression = %self.input, ?outcome, "calculator evaluated");
            self.input = match outcome {
                Ok(value) => format_number(value),
                Err(_) => String::new(),
            };
            self.result = Some(outcome);
        } else {
            self.result = None;
            self.input.push(label);
        }
    }

    fn button_rect(content: Rect, row: usize, col: usize) -> Rect {
        let pitch = BUTTON_SIZE + BUTTON_GAP;
        Rect::new(
            content.left() + MARGIN + col as f32 * pitch,
            content.top() + MARGIN * 2.0 + DISPLAY_HEIGHT + row as f32 * pitch,
            BUTTON_SIZE,
            BUTTON_SIZE,
        )
    }

    fn button_at(content: Rect, point: Point) -> Option<char> {
        KEYPAD.iter().enumerate().find_map(|(row, labels)| {
            labels
                .iter()
                .enumerate()
                .find(|(col, _)| Self::button_rect(content, row, *col).contains(point))
                .map(|(_, label)| *label)
        })
    }
}

impl App for Calculator {
    fn name(&self) -> &str {
        "Calculator"
    }

    fn handle_event(&mut self, event: &RawEvent, content: Rect) -> Option<AppAction> {
        if let Some(point) = event.left_press() {
            if let Some(label) = Self::button_at(content, point) {
                self.press(label);
            }
        } else if let Some(key) = event.pressed_key() {
            match key {
                Key::Enter => self.press('='),
                Key::Backspace => {
                    self.result = None;
                    self.input.pop();
                }
                _ => {
                    if let Some(c) = event.typed_text().and_then(|t| t.chars().next())
                        && KEYPAD.iter().flatten().any(|label| *label == c)
                    {
                        self.press(c);
                    }
                }
            }
        }
        None
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, config: &RenderConfig) {
        let palette = config.palette();
        renderer.fill_rect(content, Color::from_rgb8(50, 50, 50));

        let display = Rect::new(
            content.left() + MARGIN,
            content.top() + MARGIN,
            content.width() - MARGIN * 2.0,
            DISPLAY_HEIGHT,
        );
        renderer.fill_rect(display, Color::BLACK);
        renderer.draw_text(
            &self.display(),
            Point::new(display.left() + 5.0, display.top() + 12.0),
            &TextStyle::monospace(22.0, Color::WHITE),
        );

        let label_style = TextStyle::new(20.0, Color::WHITE);
        for (row, labels) in KEYPAD.iter().enumerate() {
            for (col, label) in labels.iter().enumerate() {
                let rect = Self::button_rect(content, row, col);
                let fill = if *label == '=' {
                    palette.accent
                } else {
                    Color::from_rgb8(70, 70, 70)
                };
                renderer.fill_rounded_rect(RoundedRect::new(rect, 4.0), fill);
                renderer.stroke_rect(rect, &Stroke::new(Color::from_rgb8(200, 200, 200), 2.0));
                renderer.draw_text_centered(&label.to_string(), rect, &label_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(evaluate("1+2*3"), Ok(7.0));
        assert_eq!(evaluate("8/4/2"), Ok(1.0));
        assert_eq!(evaluate("10-4-3"), Ok(3.0));
        assert_eq!(evaluate("-2*3+1"), Ok(-5.0));
        assert_eq!(evaluate("1.5+.5"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_errors() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("1+"), Err(CalcError::Malformed));
        assert_eq!(evaluate("*2"), Err(CalcError::Malformed));
        assert_eq!(evaluate("1..2"), Err(CalcError::Malformed));
        assert_eq!(evaluate("5/0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
    }

    #[test]
    fn test_keypad_clicks() {
        let content = Rect::new(100.0, 100.0, 300.0, 330.0);
        let mut calc = Calculator::new();
        let click = |calc: &mut Calculator, row: usize, col: usize| {
            let center = Calculator::button_rect(content, row, col).center();
            calc.handle_event(&RawEvent::pointer_down(center.x, center.y), content);
        };
        click(&mut calc, 0, 0); // 7
        click(&mut calc, 1, 3); // *
        click(&mut calc, 2, 1); // 2
        assert_eq!(calc.display(), "7*2");
        click(&mut calc, 3, 2); // =
        assert_eq!(calc.display(), "14");

        // Clicks between buttons do nothing.
        calc.handle_event(&RawEvent::pointer_down(165.0, 185.0), content);
        assert_eq!(calc.display(), "14");
    }

    #[test]
    fn test_error_then_recover() {
        let mut calc = Calculator::new();
        for c in "9/0".chars() {
            calc.press(c);
        }
        calc.press('=');
        assert_eq!(calc.display(), "Error");
        calc.press('4');
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn test_keyboard_entry() {
        let content = Rect::new(0.0, 0.0, 300.0, 330.0);
        let mut calc = Calculator::new();
        for c in "12+3x".chars() {
            calc.handle_event(&RawEvent::char(c), content);
        }
        calc.handle_event(&RawEvent::key(Key::Backspace), content);
        assert_eq!(calc.display(), "12+");
        calc.handle_event(&RawEvent::char('3'), content);
        calc.handle_event(&RawEvent::key(Key::Enter), content);
        assert_eq!(calc.display(), "15");
    }
}
