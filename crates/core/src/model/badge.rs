use std::fmt;

/// Achievement badges a player can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Badge {
    FirstWin,
    Score200,
    Streak10,
    Perfect,
    Veteran,
}

impl Badge {
    pub const ALL: [Badge; 5] = [
        Badge::FirstWin,
        Badge::Score200,
        Badge::Streak10,
        Badge::Perfect,
        Badge::Veteran,
    ];

    /// Stable identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Badge::FirstWin => "first_win",
            Badge::Score200 => "score_200",
            Badge::Streak10 => "streak_10",
            Badge::Perfect => "perfect",
            Badge::Veteran => "veteran",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Badge::FirstWin => "Beginner",
            Badge::Score200 => "On Fire",
            Badge::Streak10 => "Unstoppable",
            Badge::Perfect => "Perfectionist",
            Badge::Veteran => "Math King",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Badge::FirstWin => "Complete 1 game",
            Badge::Score200 => "Score 200+ points",
            Badge::Streak10 => "Reach a 10 answer streak",
            Badge::Perfect => "100% accuracy over at least 5 answers",
            Badge::Veteran => "Earn 1000 XP in total",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
