//! The rules as shown to players.

/// Player-facing rules, one per line.
pub const RULES: [&str; 9] = [
    "Rule 1: The match is best of five: the first player to win 3 boards wins the game.",
    "Rule 2: Each round's board has a random number of rows and columns between 7 and 11.",
    "Rule 3: The first player picks any starting square except the center square (if there is one).",
    "Rule 4: The second player starts on the square symmetric to the first player's through the center.",
    "Rule 5: Players take turns.",
    "Rule 6: A square cannot be used twice.",
    "Rule 7: On each turn a player moves to the square right, left, above or below their current one.",
    "Rule 8: The first player who cannot move loses the round.",
    "Rule 9: Have fun!",
];
