// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event name patterns and channel subscriptions

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one segment
    One,
    /// `**`: everything from here on, possibly nothing
    Rest,
}

/// Colon-separated pattern over event names.
///
/// `loader:progress` matches itself, `loader:*` matches `loader:error` but
/// not `loader:phase:complete`, and `loader:**` matches every loader event.
/// A bare `*` or `**` matches any name; an empty pattern matches none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = if pattern.is_empty() {
            Vec::new()
        } else if pattern == "*" {
            vec![Segment::Rest]
        } else {
            pattern
                .split(':')
                .map(|part| match part {
                    "*" => Segment::One,
                    "**" => Segment::Rest,
                    literal => Segment::Literal(literal.to_string()),
                })
                .collect()
        };
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn matches(&self, event_name: &str) -> bool {
        if self.segments.is_empty() {
            return false;
        }

        let mut parts = event_name.split(':');
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::One => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(expected) => {
                    if parts.next() != Some(expected.as_str()) {
                        return false;
                    }
                }
            }
        }
        parts.next().is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Handle returned by `EventBus::on` and `EventBus::subscribe`, used to detach
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

impl SubscriberId {
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// A channel subscription to one or more event patterns
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub patterns: Vec<EventPattern>,
    pub description: String,
}

impl Subscription {
    pub fn new(
        id: impl Into<String>,
        patterns: Vec<EventPattern>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: SubscriberId(id.into()),
            patterns,
            description: description.into(),
        }
    }

    /// Anonymous subscription to a single pattern
    pub fn to(pattern: &str) -> Self {
        Self {
            id: SubscriberId::generate(),
            patterns: vec![EventPattern::new(pattern)],
            description: String::new(),
        }
    }

    pub fn matches(&self, event_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_name))
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
