use crawler_core::{validate, IntervalPolicy, NewTask, TaskDraft, ValidationError};

fn check(url: &str, interval: &str) -> Result<NewTask, ValidationError> {
    validate(&TaskDraft::new(url, interval), IntervalPolicy::default())
}

#[test]
fn accepts_url_and_whole_interval() {
    assert_eq!(
        check("http://x", "30"),
        Ok(NewTask {
            url: "http://x".to_string(),
            interval: 30,
        })
    );
}

#[test]
fn empty_url_rejected_regardless_of_interval() {
    for interval in ["30", "0", "abc", "", "-1", "1.5"] {
        assert_eq!(
            check("", interval),
            Err(ValidationError::EmptyUrl),
            "interval {interval:?}"
        );
    }
}

#[test]
fn url_is_not_trimmed() {
    let task = check("  ", "10").expect("whitespace url is passed through");
    assert_eq!(task.url, "  ");
}

#[test]
fn zero_and_blank_intervals_rejected_by_default() {
    assert_eq!(check("http://x", "0"), Err(ValidationError::ZeroInterval));
    assert_eq!(check("http://x", "0.0"), Err(ValidationError::ZeroInterval));
    assert_eq!(check("http://x", ""), Err(ValidationError::ZeroInterval));
    assert_eq!(check("http://x", "   "), Err(ValidationError::ZeroInterval));
}

#[test]
fn non_numeric_intervals_rejected() {
    for raw in ["abc", "10s", "NaN", "inf", "1,5"] {
        assert_eq!(
            check("http://x", raw),
            Err(ValidationError::NotANumber {
                raw: raw.to_string()
            }),
            "interval {raw:?}"
        );
    }
}

#[test]
fn interval_whitespace_is_ignored() {
    assert_eq!(check("http://x", " 45 ").map(|t| t.interval), Ok(45));
}

#[test]
fn negative_and_fractional_intervals_rejected() {
    assert_eq!(
        check("http://x", "-5"),
        Err(ValidationError::NegativeInterval)
    );
    assert_eq!(
        check("http://x", "1.5"),
        Err(ValidationError::FractionalInterval)
    );
}

#[test]
fn zero_allowed_when_policy_permits() {
    let draft = TaskDraft::new("http://x", "0");
    assert_eq!(
        validate(&draft, IntervalPolicy::AllowZero).map(|t| t.interval),
        Ok(0)
    );
    assert_eq!(
        validate(&TaskDraft::new("http://x", "abc"), IntervalPolicy::AllowZero),
        Err(ValidationError::NotANumber {
            raw: "abc".to_string()
        })
    );
}

#[test]
fn create_body_matches_service_format() {
    let task = check("http://x", "30").unwrap();
    let body = serde_json::to_value(&task).unwrap();
    assert_eq!(body, serde_json::json!({ "url": "http://x", "interval": 30 }));
}
