use crate::{NewTask, TaskDraft, ValidationError};

/// Whether an interval of zero seconds is accepted.
///
/// `RejectZero` treats zero like any other unusable input. `AllowZero` lets it
/// through as a "do not poll" value for services that understand it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalPolicy {
    #[default]
    RejectZero,
    AllowZero,
}

/// Checks a draft and converts it into the request body for task creation.
///
/// The url is not trimmed: only the empty string is refused. The interval may
/// carry surrounding whitespace; an empty interval counts as zero.
pub fn validate(draft: &TaskDraft, policy: IntervalPolicy) -> Result<NewTask, ValidationError> {
    if draft.url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    let interval = parse_interval(&draft.interval, policy)?;
    Ok(NewTask {
        url: draft.url.clone(),
        interval,
    })
}

fn parse_interval(raw: &str, policy: IntervalPolicy) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    let value = if trimmed.is_empty() {
        0.0
    } else {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::NotANumber {
                raw: raw.to_string(),
            })?
    };

    if value == 0.0 {
        return match policy {
            IntervalPolicy::RejectZero => Err(ValidationError::ZeroInterval),
            IntervalPolicy::AllowZero => Ok(0),
        };
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeInterval);
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::FractionalInterval);
    }
    if value >= u64::MAX as f64 {
        return Err(ValidationError::NotANumber {
            raw: raw.to_string(),
        });
    }
    Ok(value as u64)
}
