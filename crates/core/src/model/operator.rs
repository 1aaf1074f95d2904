use std::fmt;

/// One of the four arithmetic operators a question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators in their canonical order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// ASCII symbol used as the stats key (`+ - * /`).
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Glyph shown to players (`×` and `÷` for the multiplicative operators).
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Operator::Add => "Addition",
            Operator::Subtract => "Subtraction",
            Operator::Multiply => "Multiplication",
            Operator::Divide => "Division",
        }
    }

    /// Position of this operator inside [`Operator::ALL`].
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            Operator::Add => 0,
            Operator::Subtract => 1,
            Operator::Multiply => 2,
            Operator::Divide => 3,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
