//! Terminal stand-ins for the page controls and the link opener

use commit_bench_core::ui::required_element_ids;
use commit_bench_core::{LabelStyle, NavAction, Navigator, PointerEvent, UiEvent, UiSurface};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

use crate::error::Error;

/// A benchmark checkbox and its label
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorState {
    pub name: String,
    pub style: LabelStyle,
}

/// A navigation button
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub action: NavAction,
    pub text: &'static str,
    pub disabled: bool,
}

/// Controls surface kept in memory and written out as a page.
///
/// Checkbox state belongs to whoever clicks the boxes and is not kept here.
#[derive(Debug, Clone)]
pub struct TerminalUi {
    elements: BTreeSet<&'static str>,
    selectors: Vec<SelectorState>,
    buttons: Vec<ButtonState>,
}

impl TerminalUi {
    pub fn new() -> Self {
        let buttons = NavAction::ALL
            .into_iter()
            .map(|action| ButtonState {
                action,
                text: button_text(action),
                disabled: false,
            })
            .collect();

        Self {
            elements: required_element_ids().collect(),
            selectors: Vec::new(),
            buttons,
        }
    }

    pub fn selectors(&self) -> &[SelectorState] {
        &self.selectors
    }

    pub fn buttons(&self) -> &[ButtonState] {
        &self.buttons
    }

    #[cfg(test)]
    pub fn button(&self, action: NavAction) -> Option<&ButtonState> {
        self.buttons.iter().find(|b| b.action == action)
    }

    pub fn has_selector(&self, name: &str) -> bool {
        self.selectors.iter().any(|s| s.name == name)
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSurface for TerminalUi {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn add_benchmark_selector(&mut self, benchmark: &str, checked: bool) {
        debug!(benchmark, checked, "Added selector");
        self.selectors.push(SelectorState {
            name: benchmark.to_string(),
            style: LabelStyle::default(),
        });
    }

    fn set_control_disabled(&mut self, action: NavAction, disabled: bool) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.action == action) {
            button.disabled = disabled;
        }
    }

    fn set_label_style(&mut self, benchmark: &str, style: &LabelStyle) {
        if let Some(selector) = self.selectors.iter_mut().find(|s| s.name == benchmark) {
            selector.style = style.clone();
        }
    }
}

fn button_text(action: NavAction) -> &'static str {
    match action {
        NavAction::ExpandLeft => "« more",
        NavAction::ContractLeft => "less »",
        NavAction::ContractRight => "« less",
        NavAction::ExpandRight => "more »",
    }
}

/// Prints commit links instead of opening a browser
#[derive(Debug, Default)]
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&mut self, url: &Url) {
        info!("Navigating to {}", url);
        println!("open {}", url);
    }
}

/// Keeps every opened link
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub opened: Vec<Url>,
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn open(&mut self, url: &Url) {
        debug!("Recorded navigation to {}", url);
        self.opened.push(url.clone());
    }
}

/// One line of interactive input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(UiEvent),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  more-left | less-left | less-right | more-right
  select NAME | deselect NAME
  click X Y        (chart coordinates)
  status | help | quit";

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        if verb.is_empty() {
            return Err(Error::InvalidCommand("empty command".to_string()));
        }
        let rest: Vec<&str> = args.split_whitespace().collect();

        let nav = |action| {
            if rest.is_empty() {
                Ok(Command::Event(UiEvent::Navigate(action)))
            } else {
                Err(Error::InvalidCommand(format!("'{}' takes no arguments", verb)))
            }
        };

        match verb {
            "more-left" => nav(NavAction::ExpandLeft),
            "less-left" => nav(NavAction::ContractLeft),
            "less-right" => nav(NavAction::ContractRight),
            "more-right" => nav(NavAction::ExpandRight),
            "select" | "deselect" => {
                // The name is the raw remainder of the line; spaces inside it matter.
                let name = args.trim_end_matches(['\r', '\n']);
                if name.trim().is_empty() {
                    return Err(Error::InvalidCommand(format!("'{}' needs a benchmark name", verb)));
                }
                Ok(Command::Event(UiEvent::ToggleBenchmark {
                    name: name.to_string(),
                    checked: verb == "select",
                }))
            }
            "click" => match rest.as_slice() {
                [x, y] => {
                    let parse = |v: &str| {
                        v.parse::<f64>()
                            .map_err(|_| Error::InvalidCommand(format!("'{}' is not a coordinate", v)))
                    };
                    Ok(Command::Event(UiEvent::ChartClick(PointerEvent {
                        x: parse(*x)?,
                        y: parse(*y)?,
                    })))
                }
                _ => Err(Error::InvalidCommand("'click' needs X and Y".to_string())),
            },
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(Error::InvalidCommand(format!("unknown command '{}'", other))),
        }
    }
}
