use crate::ui::application::Message;
use iced::widget::{button, center, container, mouse_area, opaque, stack, tooltip, Container, Text};
use iced::{Color, Element, Length};

pub fn untitled_text_table_box() -> Container<'static, Message> {
    let message = "Tip: open a short audio clip (≤15 s) with Ctrl+O";
    let text = Text::new(message).color(Color::WHITE);
    let container = Container::new(text)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(20);
    container
}

pub fn action_gated<'a, Message: Clone + 'a>(
    content: impl Into<Element<'a, Message>>,
    label: &'a str,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    let action = button(container(content).center_x(60));

    if let Some(on_press) = on_press {
        tooltip(
            action.on_press(on_press),
            label,
            tooltip::Position::FollowCursor,
        )
        .style(container::rounded_box)
        .into()
    } else {
        action.style(button::secondary).into()
    }
}

/// Displays `content` above a dimmed `base`, clicking outside triggers `on_blur`.
pub fn modal<'a, Message: Clone + 'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    let content = container(content)
        .padding(20)
        .style(container::rounded_box);
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
