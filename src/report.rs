/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Diagnostic report emitted alongside every clip, for an external
//! analysis/UI layer. An explicit return value; no process-wide pattern
//! database is involved.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::pattern::{ActivationFrame, Behavior};

/// One channel's value in one frame.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ChannelSample {
    pub id: String,
    pub activation: f32,
}

/// All channel values of one frame, with its normalized phase in the clip.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PatternSample {
    pub phase: f32,
    pub channels: Vec<ChannelSample>,
}

impl PatternSample {
    /// Channels come out sorted by name so the report is reproducible.
    pub fn new(frame: usize, frame_count: usize, pattern: &ActivationFrame) -> Self {
        let mut channels: Vec<ChannelSample> = pattern
            .iter()
            .map(|(id, activation)| ChannelSample {
                id: id.clone(),
                activation: *activation,
            })
            .collect();
        channels.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            phase: frame as f32 / frame_count as f32,
            channels,
        }
    }
}

/// Qualitative description of the behavior, for UI text.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Grammar {
    pub syntax: String,
    pub rules: Vec<String>,
}

impl Grammar {
    pub fn describe(behavior: &str) -> Self {
        match Behavior::from_str(behavior) {
            Ok(Behavior::Walk) => Self {
                syntax: "Bipedal locomotion pattern".to_string(),
                rules: vec![
                    "Forward momentum".to_string(),
                    "Weight transfer".to_string(),
                    "Balance maintenance".to_string(),
                ],
            },
            _ => Self {
                syntax: "Idle position with minimal movement".to_string(),
                rules: vec![
                    "Maintain balance".to_string(),
                    "Reduce energy expenditure".to_string(),
                ],
            },
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MotionReport {
    pub name: String,
    pub patterns: Vec<PatternSample>,
    pub total_energy: f32,
    pub grammar: Grammar,
}

impl MotionReport {
    pub fn new(
        behavior: &str,
        context: &str,
        patterns: Vec<PatternSample>,
        total_energy: f32,
    ) -> Self {
        Self {
            name: format!("{behavior}_{context}"),
            patterns,
            total_energy,
            grammar: Grammar::describe(behavior),
        }
    }

    pub fn write_json(&self, output_dir: &Path) -> io::Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = output_dir.join(format!("report_{}_{timestamp}.json", self.name));
        let json = serde_json::to_string_pretty(self)
            .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;
        let mut file = File::create(&path)?;
        file.write_all(json.as_bytes())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_grammar_names_locomotion() {
        let grammar = Grammar::describe("walk");
        assert_eq!(grammar.syntax, "Bipedal locomotion pattern");
        assert_eq!(grammar.rules.len(), 3);
    }

    #[test]
    fn anything_else_gets_the_idle_grammar() {
        for behavior in ["idle", "cartwheel", ""] {
            let grammar = Grammar::describe(behavior);
            assert_eq!(grammar.syntax, "Idle position with minimal movement");
            assert_eq!(grammar.rules.len(), 2);
        }
    }

    #[test]
    fn pattern_samples_sort_their_channels() {
        let mut frame = ActivationFrame::new();
        frame.insert("zeta".to_string(), 1.0);
        frame.insert("alpha".to_string(), 0.5);
        let sample = PatternSample::new(3, 60, &frame);
        assert_eq!(sample.phase, 0.05);
        assert_eq!(sample.channels[0].id, "alpha");
        assert_eq!(sample.channels[1].id, "zeta");
    }
}
