use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub operator: Color,
    pub name: Color,
    pub constant: Color,
    pub punctuation: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub current_token_bg: Color,
    pub type_name: Color, // Cyan for struct and variable types
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),       // Mauve for keywords
    operator: Color::Rgb(137, 220, 235),      // Sky for operators
    name: Color::Rgb(205, 214, 244),          // Plain text for identifiers
    constant: Color::Rgb(250, 179, 135),      // Orange for literals
    punctuation: Color::Rgb(137, 180, 250),   // Blue for brackets and separators
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    current_token_bg: Color::Rgb(88, 91, 112),
    type_name: Color::Rgb(148, 226, 213),
};
