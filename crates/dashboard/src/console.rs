//! Управление дашбордом с консоли: `r` обновить, `p` пауза/продолжить, `q` выход

use std::ops::ControlFlow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::live::LivePipeline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Refresh,
    TogglePolling,
    Quit,
    Unknown(String),
}

impl ConsoleCommand {
    /// Пустая строка командой не считается
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" => None,
            "r" => Some(ConsoleCommand::Refresh),
            "p" => Some(ConsoleCommand::TogglePolling),
            "q" => Some(ConsoleCommand::Quit),
            other => Some(ConsoleCommand::Unknown(other.to_string())),
        }
    }

    /// Выполнить команду. `Break` только для явного `q`.
    pub fn apply(&self, pipeline: &LivePipeline) -> ControlFlow<()> {
        match self {
            ConsoleCommand::Refresh => {
                pipeline.refresh_now();
            }
            ConsoleCommand::TogglePolling => {
                let enabled = pipeline.toggle_polling();
                tracing::info!("Polling {}", if enabled { "enabled" } else { "paused" });
            }
            ConsoleCommand::Quit => return ControlFlow::Break(()),
            ConsoleCommand::Unknown(other) => tracing::warn!("Unknown command: {}", other),
        }
        ControlFlow::Continue(())
    }
}

/// Построчное чтение команд.
///
/// Конец ввода (stdin закрыт: `</dev/null`, служба) закрывает только консоль,
/// конвейер продолжает работать.
pub struct Console<R> {
    lines: Lines<R>,
    open: bool,
}

impl<R: AsyncBufRead + Unpin> Console<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Следующая команда; `None` когда ввод закончился
    pub async fn next_command(&mut self) -> std::io::Result<Option<ConsoleCommand>> {
        while self.open {
            match self.lines.next_line().await? {
                Some(line) => {
                    if let Some(command) = ConsoleCommand::parse(&line) {
                        return Ok(Some(command));
                    }
                }
                None => self.open = false,
            }
        }
        Ok(None)
    }
}
