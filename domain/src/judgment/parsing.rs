//! Verdict parsing for the judge node.
//!
//! Extracts a winner and a justification from free-form judge output.
//! Pure text matching, no I/O. Ambiguity is an error: a persona is never
//! picked by default.
//!
//! | Step | Rule |
//! |------|------|
//! | 1 | A `WINNER:` line decides: a single name wins, and with both names the first one wins unless the line reads as a tie |
//! | 2 | Otherwise lines that talk about winning (`win`, `won`, `winner`, ...) must name exactly one persona |
//! | 3 | Otherwise [`DomainError::JudgmentParseFailure`] |
//!
//! Lines that only say who lost ("The Philosopher lost") never decide.

use crate::core::error::DomainError;
use crate::core::persona::Persona;
use crate::debate::verdict::Verdict;

const WINNER_LABEL: &str = "WINNER:";
const JUSTIFICATION_LABEL: &str = "JUSTIFICATION:";

/// Words that make a WINNER value naming both personas a non-answer
const NO_DECISION_WORDS: [&str; 8] = [
    "or", "tie", "tied", "draw", "both", "neither", "equal", "equally",
];

const WIN_WORDS: [&str; 5] = ["win", "wins", "won", "winner", "winning"];

/// Personas whose names appear in `text` (case-insensitive)
fn mentioned_personas(text: &str) -> Vec<Persona> {
    let upper = text.to_uppercase();
    Persona::ALL
        .into_iter()
        .filter(|p| upper.contains(&p.display_name().to_uppercase()))
        .collect()
}

/// Persona whose name appears first in `text`
fn first_named(text: &str) -> Option<Persona> {
    let upper = text.to_uppercase();
    Persona::ALL
        .into_iter()
        .filter_map(|p| upper.find(&p.display_name().to_uppercase()).map(|at| (at, p)))
        .min_by_key(|(at, _)| *at)
        .map(|(_, p)| p)
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn has_any_word(text: &str, vocabulary: &[&str]) -> bool {
    words(text).any(|w| vocabulary.contains(&w.as_str()))
}

/// Strip markdown emphasis and whitespace around a label line
fn normalized(line: &str) -> String {
    line.trim()
        .trim_start_matches(['*', '#', '-', '>', ' '])
        .replace("**", "")
        .trim()
        .to_string()
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if head.eq_ignore_ascii_case(label) {
        Some(line[label.len()..].trim())
    } else {
        None
    }
}

fn winner_from_label(response: &str) -> Option<Result<Persona, DomainError>> {
    response.lines().find_map(|line| {
        let line = normalized(line);
        let value = strip_label(&line, WINNER_LABEL)?;
        Some(match mentioned_personas(value).as_slice() {
            [winner] => Ok(*winner),
            [] => Err(DomainError::JudgmentParseFailure(format!(
                "WINNER line names no known persona: '{}'",
                value
            ))),
            _ if has_any_word(value, &NO_DECISION_WORDS) => {
                Err(DomainError::JudgmentParseFailure(format!(
                    "WINNER line declares no single winner: '{}'",
                    value
                )))
            }
            _ => first_named(value).ok_or_else(|| {
                DomainError::JudgmentParseFailure(format!("unreadable WINNER line: '{}'", value))
            }),
        })
    })
}

fn winner_from_prose(response: &str) -> Result<Persona, DomainError> {
    let win_lines: Vec<&str> = response
        .lines()
        .filter(|line| has_any_word(line, &WIN_WORDS))
        .collect();
    match mentioned_personas(&win_lines.join("\n")).as_slice() {
        [winner] => Ok(*winner),
        [] => Err(DomainError::JudgmentParseFailure(
            "no persona named as winner in judge output".to_string(),
        )),
        _ => Err(DomainError::JudgmentParseFailure(
            "both personas named as winner without a WINNER line".to_string(),
        )),
    }
}

fn justification(response: &str) -> String {
    let lines: Vec<String> = response.lines().map(normalized).collect();

    if let Some(pos) = lines
        .iter()
        .position(|l| strip_label(l, JUSTIFICATION_LABEL).is_some())
    {
        let mut parts = Vec::new();
        if let Some(first) = strip_label(&lines[pos], JUSTIFICATION_LABEL)
            && !first.is_empty()
        {
            parts.push(first.to_string());
        }
        parts.extend(
            response
                .lines()
                .skip(pos + 1)
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
        let text = parts.join("\n");
        if !text.is_empty() {
            return text;
        }
    }

    let without_winner: Vec<&str> = response
        .lines()
        .filter(|l| strip_label(&normalized(l), WINNER_LABEL).is_none())
        .collect();
    let text = without_winner.join("\n").trim().to_string();
    if text.is_empty() {
        response.trim().to_string()
    } else {
        text
    }
}

/// Parse judge output into a [`Verdict`].
///
/// # Examples
///
/// ```
/// use debate_domain::judgment::parsing::parse_verdict;
/// use debate_domain::Persona;
///
/// let v = parse_verdict("WINNER: Philosopher\nJUSTIFICATION: Sharper framing.").unwrap();
/// assert_eq!(v.winner, Persona::Philosopher);
/// assert_eq!(v.justification, "Sharper framing.");
///
/// assert!(parse_verdict("Both argued well.").is_err());
/// ```
pub fn parse_verdict(response: &str) -> Result<Verdict, DomainError> {
    if response.trim().is_empty() {
        return Err(DomainError::JudgmentParseFailure(
            "judge returned empty text".to_string(),
        ));
    }

    let winner = match winner_from_label(response) {
        Some(result) => result?,
        None => winner_from_prose(response)?,
    };

    Ok(Verdict::new(winner, justification(response)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labelled_response() {
        let response = "WINNER: Scientist\nJUSTIFICATION: Cited trial data, while the Philosopher stayed abstract.";
        let verdict = parse_verdict(response).unwrap();
        assert_eq!(verdict.winner, Persona::Scientist);
        assert_eq!(
            verdict.justification,
            "Cited trial data, while the Philosopher stayed abstract."
        );
    }

    #[test]
    fn test_parse_markdown_labels() {
        let response = "**Winner:** philosopher\n\n**Justification:**\nClarified the concept of harm.\nAnswered every rebuttal.";
        let verdict = parse_verdict(response).unwrap();
        assert_eq!(verdict.winner, Persona::Philosopher);
        assert_eq!(
            verdict.justification,
            "Clarified the concept of harm.\nAnswered every rebuttal."
        );
    }

    #[test]
    fn test_winner_line_overrides_mentions_elsewhere() {
        let response = "The Scientist made good points but the Philosopher was sharper.\nWINNER: Philosopher";
        let verdict = parse_verdict(response).unwrap();
        assert_eq!(verdict.winner, Persona::Philosopher);
        assert_eq!(
            verdict.justification,
            "The Scientist made good points but the Philosopher was sharper."
        );
    }

    #[test]
    fn test_single_mention_without_label() {
        let verdict = parse_verdict("The scientist clearly won this one.").unwrap();
        assert_eq!(verdict.winner, Persona::Scientist);
        assert_eq!(verdict.justification, "The scientist clearly won this one.");
    }

    #[test]
    fn test_winner_line_names_loser_after_winner() {
        let verdict =
            parse_verdict("WINNER: Philosopher, who outargued the Scientist.\nJUSTIFICATION: Sharper.")
                .unwrap();
        assert_eq!(verdict.winner, Persona::Philosopher);

        let verdict = parse_verdict("**Winner:** the scientist (over the philosopher)").unwrap();
        assert_eq!(verdict.winner, Persona::Scientist);

        let verdict =
            parse_verdict("WINNER: Philosopher, even though the Scientist had more data").unwrap();
        assert_eq!(verdict.winner, Persona::Philosopher);
    }

    #[test]
    fn test_loser_mention_is_not_a_win() {
        let err = parse_verdict("The Philosopher lost this debate.").unwrap_err();
        assert!(matches!(err, DomainError::JudgmentParseFailure(_)));

        let verdict =
            parse_verdict("The Philosopher lost this debate.\nThe Scientist wins on evidence.")
                .unwrap();
        assert_eq!(verdict.winner, Persona::Scientist);
    }

    #[test]
    fn test_no_persona_is_failure() {
        let err = parse_verdict("It was a fine exchange of views.").unwrap_err();
        assert!(matches!(err, DomainError::JudgmentParseFailure(_)));
    }

    #[test]
    fn test_both_personas_without_label_is_failure() {
        let err = parse_verdict("Scientist and Philosopher tied.").unwrap_err();
        assert!(matches!(err, DomainError::JudgmentParseFailure(_)));
    }

    #[test]
    fn test_ambiguous_winner_line_is_failure() {
        let err = parse_verdict("WINNER: Scientist or Philosopher\nJUSTIFICATION: hard call").unwrap_err();
        assert!(matches!(err, DomainError::JudgmentParseFailure(_)));
    }

    #[test]
    fn test_tied_winner_line_is_failure() {
        for line in [
            "WINNER: Both the Scientist and the Philosopher",
            "WINNER: Scientist and Philosopher tied",
            "WINNER: Neither Scientist nor Philosopher",
        ] {
            assert!(parse_verdict(line).is_err(), "{line}");
        }
    }

    #[test]
    fn test_unknown_winner_line_is_failure() {
        let err = parse_verdict("WINNER: Tie\nJUSTIFICATION: even").unwrap_err();
        assert!(matches!(err, DomainError::JudgmentParseFailure(_)));
    }

    #[test]
    fn test_empty_is_failure() {
        assert!(parse_verdict("  \n ").is_err());
    }
}
