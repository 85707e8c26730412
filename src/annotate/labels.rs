use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Unknown,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Unknown => "unknown",
        }
    }

    /// Only the three trusted upstream labels parse; `unknown` does not.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "junior" => Some(ExperienceLevel::Junior),
            "mid" => Some(ExperienceLevel::Mid),
            "senior" => Some(ExperienceLevel::Senior),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Technical,
    Behavioral,
    Conceptual,
    General,
    Unknown,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
            QuestionType::Conceptual => "conceptual",
            QuestionType::General => "general",
            QuestionType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn from_skill_count(count: usize) -> Self {
        if count >= 8 {
            Complexity::High
        } else if count >= 4 {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileStrength {
    Basic,
    Moderate,
    Strong,
}

impl ProfileStrength {
    pub fn assess(skill_count: usize, skill_diversity: usize) -> Self {
        if skill_count >= 6 && skill_diversity >= 3 {
            ProfileStrength::Strong
        } else if skill_count >= 3 {
            ProfileStrength::Moderate
        } else {
            ProfileStrength::Basic
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileStrength::Basic => "basic",
            ProfileStrength::Moderate => "moderate",
            ProfileStrength::Strong => "strong",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(ExperienceLevel, QuestionType, Difficulty, Complexity, ProfileStrength);
