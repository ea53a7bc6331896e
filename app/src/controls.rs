use macroquad::prelude::*;

/// Height of the control strip pinned to the bottom of the window.
pub const CONTROL_STRIP_HEIGHT: f32 = 90.0;

const ROW_HEIGHT: f32 = 30.0;
const FIELD_WIDTH: f32 = 56.0;
const MAX_FIELD_CHARS: usize = 8;
const DIRECTIONS: [&str; 2] = ["Clockwise", "Anticlockwise"];

/// Which text field keyboard input currently lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    None,
    Length,
    Speed,
}

/// A creation request exactly as typed, still unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub length: String,
    pub speed: String,
    pub direction: String,
}

/// Bottom strip with the length and speed fields, the direction selector
/// and the create button. Click a field to focus it, then type; the
/// direction button cycles through the supported rotations.
pub struct ControlPanel {
    length: String,
    speed: String,
    direction_index: usize,
    focus: Focus,
    status: String,
    status_is_error: bool,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            length: String::new(),
            speed: String::new(),
            direction_index: 0,
            focus: Focus::None,
            status: String::new(),
            status_is_error: false,
        }
    }

    pub fn selected_direction(&self) -> &'static str {
        DIRECTIONS[self.direction_index]
    }

    pub fn cycle_direction(&mut self) {
        self.direction_index = (self.direction_index + 1) % DIRECTIONS.len();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = true;
    }

    /// Draws the strip and returns a request when the create button was
    /// clicked this frame.
    pub fn draw(&mut self) -> Option<CreateRequest> {
        self.handle_typing();

        let strip_y = screen_height() - CONTROL_STRIP_HEIGHT;
        draw_rectangle(
            0.0,
            strip_y,
            screen_width(),
            CONTROL_STRIP_HEIGHT,
            Color::from_rgba(222, 222, 222, 255),
        );
        draw_line(0.0, strip_y, screen_width(), strip_y, 1.0, GRAY);

        let row_y = strip_y + 10.0;
        draw_text("Length:", 10.0, row_y + ROW_HEIGHT * 0.7, 20.0, BLACK);
        let length_clicked = field_hit(
            80.0,
            row_y,
            FIELD_WIDTH,
            ROW_HEIGHT,
            &self.length,
            self.focus == Focus::Length,
        );

        draw_text("Speed (ms):", 148.0, row_y + ROW_HEIGHT * 0.7, 20.0, BLACK);
        let speed_clicked = field_hit(
            252.0,
            row_y,
            FIELD_WIDTH,
            ROW_HEIGHT,
            &self.speed,
            self.focus == Focus::Speed,
        );

        let direction_clicked = button_hit(320.0, row_y, 136.0, ROW_HEIGHT, self.selected_direction());
        if direction_clicked {
            self.cycle_direction();
        }

        let create_clicked = button_hit(468.0, row_y, 130.0, ROW_HEIGHT, "Create Snake");

        if length_clicked {
            self.focus = Focus::Length;
        } else if speed_clicked {
            self.focus = Focus::Speed;
        } else if is_mouse_button_pressed(MouseButton::Left) && !direction_clicked && !create_clicked {
            self.focus = Focus::None;
        }

        let status_color = if self.status_is_error { RED } else { DARKGRAY };
        for (i, line) in self.status.lines().enumerate() {
            draw_text(line, 10.0, strip_y + 56.0 + i as f32 * 14.0, 16.0, status_color);
        }

        if create_clicked {
            Some(CreateRequest {
                length: self.length.clone(),
                speed: self.speed.clone(),
                direction: self.selected_direction().to_string(),
            })
        } else {
            None
        }
    }

    fn handle_typing(&mut self) {
        let field = match self.focus {
            Focus::None => {
                // Drop typed characters so they do not land in the next
                // field to gain focus.
                while get_char_pressed().is_some() {}
                return;
            }
            Focus::Length => &mut self.length,
            Focus::Speed => &mut self.speed,
        };

        while let Some(c) = get_char_pressed() {
            if !c.is_control() && field.len() < MAX_FIELD_CHARS {
                field.push(c);
            }
        }
        if is_key_pressed(KeyCode::Backspace) {
            field.pop();
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn field_hit(x: f32, y: f32, w: f32, h: f32, text: &str, focused: bool) -> bool {
    let clicked = {
        let (mx, my) = mouse_position();
        mx >= x
            && mx <= x + w
            && my >= y
            && my <= y + h
            && is_mouse_button_pressed(MouseButton::Left)
    };

    draw_rectangle(x, y, w, h, WHITE);
    let outline = if focused { BLUE } else { GRAY };
    draw_rectangle_lines(x, y, w, h, 2.0, outline);
    draw_text(text, x + 6.0, y + h * 0.7, 20.0, BLACK);

    clicked
}

fn button_hit(x: f32, y: f32, w: f32, h: f32, label: &str) -> bool {
    let hovered = {
        let (mx, my) = mouse_position();
        mx >= x && mx <= x + w && my >= y && my <= y + h
    };
    let pressed = hovered && is_mouse_button_pressed(MouseButton::Left);

    let fill = if hovered {
        Color::from_rgba(200, 200, 200, 255)
    } else {
        Color::from_rgba(235, 235, 235, 255)
    };
    draw_rectangle(x, y, w, h, fill);
    draw_rectangle_lines(x, y, w, h, 2.0, GRAY);
    draw_text(label, x + 12.0, y + h * 0.7, 20.0, BLACK);

    pressed
}
