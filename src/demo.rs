//! Walkthrough of the stack's public API: fill, drain past empty, then push
//! enough values to force the buffer to double again.

use std::io::{self, Write};

use colored::Colorize;
use thiserror::Error;
use tracing::info;

use crate::error::StackError;
use crate::stack::Stack;

/// Any variant makes `stack_demo` exit with status 1. Only `Create` is
/// expected in practice; `Stack` and `Io` cover a push that cannot grow or
/// output that cannot be written partway through the run, which are reported
/// rather than dropped.
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("failed to create the stack: {0}")]
    Create(#[source] StackError),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error("failed to write demo output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub initial_capacity: usize,
    pub initial_values: Vec<i32>,
    /// Number of pops in the drain phase; more than `initial_values.len()`
    /// shows the empty-stack message.
    pub pop_attempts: usize,
    pub growth_values: Vec<i32>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            initial_capacity: 3,
            initial_values: vec![10, 20, 30, 40, 50],
            pop_attempts: 6,
            growth_values: (60..70).collect(),
        }
    }
}

pub fn run<W: Write>(config: &DemoConfig, out: &mut W) -> Result<(), DemoError> {
    let mut stack = Stack::with_capacity(config.initial_capacity).map_err(DemoError::Create)?;
    info!(?config, "demo started");

    for &value in &config.initial_values {
        push_and_show(&mut stack, value, out)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Popping elements from the stack:".bold())?;
    for _ in 0..config.pop_attempts {
        match stack.pop() {
            Some(value) => writeln!(out, "Popped element: {value}")?,
            None => writeln!(out, "{}", "Stack is empty, nothing to pop.".yellow())?,
        }
        writeln!(out, "{stack}")?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Testing stack growth:".bold())?;
    for &value in &config.growth_values {
        push_and_show(&mut stack, value, out)?;
    }

    stack.destroy();
    Ok(())
}

fn push_and_show<W: Write>(
    stack: &mut Stack<i32>,
    value: i32,
    out: &mut W,
) -> Result<(), DemoError> {
    let before = stack.capacity();
    stack.push(value)?;
    if stack.capacity() != before {
        let message = format!("Capacity doubled to: {}", stack.capacity());
        writeln!(out, "{}", message.cyan())?;
    }
    writeln!(out, "Pushing {value} onto the stack:")?;
    writeln!(out, "{stack}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(config: &DemoConfig) -> Result<String, DemoError> {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        run(config, &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_default_config_values() {
        let config = DemoConfig::default();
        assert_eq!(config.initial_capacity, 3);
        assert_eq!(config.initial_values, vec![10, 20, 30, 40, 50]);
        assert!(config.pop_attempts > config.initial_values.len());
        assert_eq!(config.growth_values.len(), 10);
    }

    #[test]
    fn test_default_run_output() {
        let output = run_to_string(&DemoConfig::default()).unwrap();

        assert!(output.contains("Pushing 10 onto the stack:\nStack: 10\n"));
        assert!(output.contains("Capacity: 3, Size: 1, Top: 0"));
        assert!(output.contains("Capacity doubled to: 6\nPushing 40 onto the stack:"));
        assert!(output.contains("Stack: 50 40 30 20 10\nCapacity: 6, Size: 5, Top: 4"));
        assert!(output.contains("Popped element: 50"));
        assert!(output.contains("Popped element: 10\nStack: \nCapacity: 6, Size: 0, Top: -1"));
        assert_eq!(output.matches("Stack is empty, nothing to pop.").count(), 1);
        assert!(output.contains("Capacity doubled to: 12\nPushing 66 onto the stack:"));
        let last_two: Vec<&str> = output.lines().rev().take(2).collect();
        assert_eq!(
            last_two,
            vec![
                "Capacity: 12, Size: 10, Top: 9",
                "Stack: 69 68 67 66 65 64 63 62 61 60",
            ]
        );
    }

    #[test]
    fn test_pops_come_out_in_reverse() {
        let output = run_to_string(&DemoConfig::default()).unwrap();
        let popped: Vec<&str> = output
            .lines()
            .filter_map(|line| line.strip_prefix("Popped element: "))
            .collect();
        assert_eq!(popped, vec!["50", "40", "30", "20", "10"]);
    }

    #[test]
    fn test_growth_count() {
        let output = run_to_string(&DemoConfig::default()).unwrap();
        assert_eq!(output.matches("Capacity doubled to:").count(), 2);
    }

    #[test]
    fn test_construction_failure_stops_run() {
        let config = DemoConfig {
            initial_capacity: usize::MAX,
            ..DemoConfig::default()
        };
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        let err = run(&config, &mut buffer).unwrap_err();

        assert!(matches!(err, DemoError::Create(StackError::AllocationFailure { .. })));
        assert!(buffer.is_empty());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_not_construction_failure() {
        colored::control::set_override(false);
        let err = run(&DemoConfig::default(), &mut ClosedPipe).unwrap_err();

        assert!(matches!(err, DemoError::Io(_)));
        assert!(err.to_string().contains("failed to write demo output"));
    }

    #[test]
    fn test_zero_capacity_run() {
        let config = DemoConfig {
            initial_capacity: 0,
            initial_values: vec![1, 2, 3],
            pop_attempts: 3,
            growth_values: vec![],
        };
        let output = run_to_string(&config).unwrap();

        assert!(output.contains("Capacity doubled to: 1\nPushing 1 onto the stack:"));
        assert!(output.contains("Capacity doubled to: 4\nPushing 3 onto the stack:"));
        assert!(!output.contains("Stack is empty"));
    }
}
