//! Closed-form question generators.
//!
//! Every generator draws a handful of bounded integers from the supplied
//! random source and formats a prompt that embeds them, so the expected
//! answer can always be recomputed from the prompt text.

use rand::Rng;
use uuid::Builder;

use crate::model::{AnswerKind, Difficulty, Question};

/// The built-in question templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    Arithmetic,
    Equation,
    Fraction,
    WordProblem,
    Area,
}

impl Generator {
    /// All generators, in the order used for unrecognised topics.
    pub const ALL: [Generator; 5] = [
        Generator::Arithmetic,
        Generator::Equation,
        Generator::WordProblem,
        Generator::Fraction,
        Generator::Area,
    ];

    /// Category tag attached to questions from this generator.
    pub fn category(self) -> &'static str {
        match self {
            Generator::Arithmetic => "arithmetic",
            Generator::Equation => "equations",
            Generator::Fraction => "fractions",
            Generator::WordProblem => "division",
            Generator::Area => "geometry",
        }
    }

    /// Candidate generators for a free-text topic.
    pub fn for_topic(topic: &str) -> &'static [Generator] {
        match topic.trim().to_lowercase().as_str() {
            "geometry" => &[Generator::Area, Generator::Fraction],
            "algebra" | "equations" => &[Generator::Equation, Generator::Arithmetic],
            "fractions" | "ratios" => &[Generator::Fraction, Generator::WordProblem],
            _ => &Self::ALL,
        }
    }

    pub fn generate<R: Rng>(self, difficulty: Difficulty, rng: &mut R) -> Question {
        match self {
            Generator::Arithmetic => arithmetic(difficulty, rng),
            Generator::Equation => equation(difficulty, rng),
            Generator::Fraction => fraction(difficulty, rng),
            Generator::WordProblem => word_problem(difficulty, rng),
            Generator::Area => area(difficulty, rng),
        }
    }
}

/// Mint a v4-shaped identifier from the given random source.
pub fn mint_id<R: Rng>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.random();
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}

fn question<R: Rng>(rng: &mut R, prompt: String, answer: String, generator: Generator) -> Question {
    let answer_type = match generator {
        Generator::Fraction => AnswerKind::ShortText,
        _ => AnswerKind::Numeric,
    };
    Question {
        id: mint_id(rng),
        prompt,
        answer,
        category: generator.category().to_string(),
        answer_type,
    }
}

/// Addition when easy, subtraction at medium, multiplication when hard.
pub fn arithmetic<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Question {
    let (prompt, answer) = match difficulty {
        Difficulty::Easy => {
            let a: i64 = rng.random_range(10..=40);
            let b: i64 = rng.random_range(5..=20);
            (format!("Compute: {a} + {b}"), a + b)
        }
        Difficulty::Medium => {
            let a: i64 = rng.random_range(20..=80);
            let b: i64 = rng.random_range(6..=15);
            (format!("Compute: {a} − {b}"), a - b)
        }
        Difficulty::Hard => {
            let a: i64 = rng.random_range(6..=15);
            let b: i64 = rng.random_range(8..=20);
            (format!("Compute: {a} × {b}"), a * b)
        }
    };
    question(rng, prompt, answer.to_string(), Generator::Arithmetic)
}

/// `a·x + b = total`, solved for a positive integer `x`.
pub fn equation<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Question {
    let a: i64 = if difficulty == Difficulty::Easy {
        rng.random_range(2..=8)
    } else {
        rng.random_range(3..=12)
    };
    let b: i64 = if difficulty.is_hard() {
        rng.random_range(10..=50)
    } else {
        rng.random_range(5..=20)
    };
    let x: i64 = if difficulty.is_hard() {
        rng.random_range(5..=20)
    } else {
        rng.random_range(1..=10)
    };
    let total = a * x + b;
    let prompt = format!("Solve for x: {a}x + {b} = {total}");
    question(rng, prompt, x.to_string(), Generator::Equation)
}

/// `(n/d) × m`, answered as a decimal with two places.
pub fn fraction<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Question {
    let numerator: i64 = rng.random_range(1..=8);
    let denominator: i64 = rng.random_range(2..=12);
    let multiplier: i64 = if difficulty.is_hard() {
        rng.random_range(3..=9)
    } else {
        rng.random_range(2..=5)
    };
    let prompt = format!(
        "Simplify: ({numerator}/{denominator}) × {multiplier}. \
         Give your answer as a fraction or decimal."
    );
    let value = (numerator * multiplier) as f64 / denominator as f64;
    question(rng, prompt, format!("{value:.2}"), Generator::Fraction)
}

/// Sharing items evenly among groups; the answer is the floor quotient.
pub fn word_problem<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Question {
    let total: i64 = rng.random_range(24..=60);
    let groups: i64 = if difficulty.is_hard() {
        rng.random_range(5..=8)
    } else {
        rng.random_range(3..=6)
    };
    let prompt = format!(
        "A teacher has {total} markers and shares them evenly among {groups} tables. \
         How many markers does each table get?"
    );
    question(rng, prompt, (total / groups).to_string(), Generator::WordProblem)
}

/// Area of an integer-sided rectangle.
pub fn area<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Question {
    let length: i64 = rng.random_range(4..=12);
    let width: i64 = if difficulty.is_hard() {
        rng.random_range(6..=15)
    } else {
        rng.random_range(3..=10)
    };
    let prompt = format!("Find the area of a rectangle with length {length} and width {width}.");
    question(rng, prompt, (length * width).to_string(), Generator::Area)
}
