use ratatui::style::{Color, Modifier, Style};

use crate::window::ThemeComponent;

pub(super) fn component_style(component: ThemeComponent) -> Style {
    match component {
        ThemeComponent::RefviewTitle => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        ThemeComponent::RefviewFooter => Style::default().fg(Color::Gray),
        ThemeComponent::RefviewLocalBranchesHeader
        | ThemeComponent::RefviewRemoteBranchesHeader
        | ThemeComponent::RefviewTagsHeader => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ThemeComponent::RefviewLocalBranch => Style::default().fg(Color::Green),
        ThemeComponent::RefviewRemoteBranch => Style::default().fg(Color::Red),
        ThemeComponent::RefviewTag => Style::default().fg(Color::Magenta),
        ThemeComponent::SearchMatch => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow),
        ThemeComponent::None => Style::default(),
    }
}

pub(super) fn selected_style(active: bool) -> Style {
    if active {
        Style::default().bg(Color::Blue)
    } else {
        Style::default().bg(Color::DarkGray)
    }
}
