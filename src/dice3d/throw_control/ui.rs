//! Throw Control UI
//!
//! Contains the function spawning the centered throw button.

use super::state::*;
use bevy::prelude::*;

use bevy_material_ui::prelude::*;

/// Spawn the throw button in the middle of the window
pub fn spawn_throw_button(commands: &mut Commands, theme: &MaterialTheme, label: &str) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|root| {
            root.spawn((
                MaterialButtonBuilder::new(label).filled().build(theme),
                ThrowButton,
                Interaction::None,
                ZIndex(10),
            ))
            .insert(Node {
                padding: UiRect::axes(Val::Px(24.0), Val::Px(12.0)),
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|btn| {
                btn.spawn((
                    ButtonLabel,
                    Text::new(label),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(theme.on_primary),
                ));
            });
        });
}
