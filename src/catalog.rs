//! Static exercise catalog.
//!
//! The catalog is an explicit configuration table loaded once at startup and
//! handed to the router state; route logic looks entries up by id and never
//! owns catalog literals of its own.

use serde::Serialize;

pub const LOGIN_BASIC: &str = "login_basic";
pub const SEARCH_BASIC: &str = "search_basic";
pub const ITEM_DETAIL: &str = "item_detail";
pub const COMMENT_FORM: &str = "comment_form";
pub const BOOLEAN_BLIND: &str = "boolean_blind";
pub const TIME_BLIND: &str = "time_blind";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Tiered hints, from a gentle nudge to a worked payload.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Hints {
    pub low: &'static str,
    pub medium: &'static str,
    pub high: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub vulnerable_endpoint: &'static str,
    pub secure_endpoint: &'static str,
    pub learning_objectives: &'static [&'static str],
    pub hints: Hints,
    pub what_to_look_for: &'static [&'static str],
    pub verification_criteria: &'static str,
}

const CATALOG: &[ExerciseDefinition] = &[
    ExerciseDefinition {
        id: LOGIN_BASIC,
        name: "Basic Login Injection",
        difficulty: Difficulty::Easy,
        description: "Learn basic SQL injection through login form",
        vulnerable_endpoint: "/vulnerable/login",
        secure_endpoint: "/secure/login",
        learning_objectives: &[
            "Understand how string concatenation in SQL creates vulnerabilities",
            "Learn to identify login bypass techniques",
            "Practice with basic SQL injection payloads",
            "Compare vulnerable vs secure implementations",
        ],
        hints: Hints {
            low: "Try using single quotes in the username field",
            medium: "Look for ways to comment out the password check",
            high: "Use payloads like: admin'-- or admin' OR '1'='1",
        },
        what_to_look_for: &[
            "Input reflected in SQL query",
            "Error messages revealing database structure",
            "Unexpected login success",
            "Ability to bypass authentication",
        ],
        verification_criteria: "Successfully bypass login with SQL injection",
    },
    ExerciseDefinition {
        id: SEARCH_BASIC,
        name: "Product Search Injection",
        difficulty: Difficulty::Easy,
        description: "Inject SQL through search parameters",
        vulnerable_endpoint: "/vulnerable/search",
        secure_endpoint: "/secure/search",
        learning_objectives: &[
            "Understand parameter injection vulnerabilities",
            "Learn to extract data through search functions",
            "Practice UNION-based injection techniques",
            "Identify information disclosure through errors",
        ],
        hints: Hints {
            low: "Try special characters in the search box",
            medium: "Look for ways to extract table structure",
            high: "Use UNION SELECT to extract data from other tables",
        },
        what_to_look_for: &[
            "Search results revealing database structure",
            "Error messages with table/column names",
            "Ability to extract data from other tables",
            "Unexpected search results",
        ],
        verification_criteria: "Successfully extract user data through search injection",
    },
    ExerciseDefinition {
        id: ITEM_DETAIL,
        name: "Item Detail Injection",
        difficulty: Difficulty::Medium,
        description: "Numeric parameter injection",
        vulnerable_endpoint: "/vulnerable/item",
        secure_endpoint: "/secure/item",
        learning_objectives: &[
            "Understand numeric parameter vulnerabilities",
            "Learn stacked query injection techniques",
            "Practice data extraction through ID parameters",
            "Identify blind injection opportunities",
        ],
        hints: Hints {
            low: "Try modifying the ID parameter in the URL",
            medium: "Look for ways to execute multiple SQL statements",
            high: "Use stacked queries to extract or modify data",
        },
        what_to_look_for: &[
            "Ability to modify ID parameter behavior",
            "Error messages revealing database structure",
            "Unexpected data returned",
            "Ability to execute multiple statements",
        ],
        verification_criteria: "Successfully extract sensitive data through ID parameter",
    },
    ExerciseDefinition {
        id: COMMENT_FORM,
        name: "Comment Form Injection",
        difficulty: Difficulty::Medium,
        description: "Injection through comment submission",
        vulnerable_endpoint: "/vulnerable/comment",
        secure_endpoint: "/secure/comment",
        learning_objectives: &[
            "Understand form-based injection vulnerabilities",
            "Learn to inject through multiple parameters",
            "Practice data manipulation techniques",
            "Identify stored procedure vulnerabilities",
        ],
        hints: Hints {
            low: "Try special characters in the comment fields",
            medium: "Look for ways to modify the database structure",
            high: "Use injection to create or modify user accounts",
        },
        what_to_look_for: &[
            "Ability to inject through form fields",
            "Error messages revealing database structure",
            "Unexpected database modifications",
            "Ability to create or modify records",
        ],
        verification_criteria: "Successfully modify database through comment injection",
    },
    ExerciseDefinition {
        id: BOOLEAN_BLIND,
        name: "Boolean-based Blind Injection",
        difficulty: Difficulty::Hard,
        description: "Advanced blind injection techniques",
        vulnerable_endpoint: "/vulnerable/boolean",
        secure_endpoint: "/secure/boolean",
        learning_objectives: &[
            "Understand blind SQL injection concepts",
            "Learn boolean-based inference techniques",
            "Practice data extraction without direct output",
            "Master advanced injection methodologies",
        ],
        hints: Hints {
            low: "Look for different responses based on true/false conditions",
            medium: "Try to infer data by testing boolean conditions",
            high: "Use binary search techniques to extract data character by character",
        },
        what_to_look_for: &[
            "Different responses for true vs false conditions",
            "Ability to infer data through response differences",
            "Patterns in response behavior",
            "Opportunities for automated data extraction",
        ],
        verification_criteria: "Successfully extract sensitive data using boolean-based blind injection",
    },
    ExerciseDefinition {
        id: TIME_BLIND,
        name: "Time-based Blind Injection",
        difficulty: Difficulty::Hard,
        description: "Time-based blind injection",
        vulnerable_endpoint: "/vulnerable/time",
        secure_endpoint: "/secure/time",
        learning_objectives: &[
            "Understand time-based blind injection",
            "Learn to use timing for data inference",
            "Practice advanced injection techniques",
            "Master automated exploitation methods",
        ],
        hints: Hints {
            low: "Look for different response times based on conditions",
            medium: "Try to use timing functions to infer data",
            high: "Use heavy subqueries to create timing differences",
        },
        what_to_look_for: &[
            "Different response times for different conditions",
            "Ability to infer data through timing analysis",
            "Patterns in response timing",
            "Opportunities for automated timing-based extraction",
        ],
        verification_criteria: "Successfully extract data using time-based blind injection",
    },
];

#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    entries: &'static [ExerciseDefinition],
}

impl ExerciseCatalog {
    /// The catalog shipped with the lab.
    pub fn builtin() -> Self {
        Self { entries: CATALOG }
    }

    pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
