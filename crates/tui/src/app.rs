use std::collections::HashMap;
use std::io::stdout;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_core::{
    GeometryProvider, ParallaxRegistry, ScrollCoalescer, SectionTracker, VisibilityEngine,
};
use folio_protocol::content::SkillCategory;
use folio_protocol::{
    AnimationConfig, ElementBounds, ElementId, IdStr, ParallaxConfig, Portfolio, Section,
    SectionBounds, UiCommand,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    style::{Color, Modifier, Style},
};

/// Rows reserved for the fixed navigation bar.
const NAV_ROWS: u16 = 2;
/// Trigger lead in rows (the pixel constant is meaningless here).
const TRIGGER_LEAD_ROWS: f64 = 2.0;
/// Reveal margin in rows.
const REVEAL_MARGIN_ROWS: f64 = 2.0;
/// Parallax stays on for any plausible terminal width.
const PARALLAX_MIN_COLS: f64 = 60.0;

const HERO: ElementId = 1;
const ABOUT: ElementId = 2;
const SKILLS: ElementId = 3;
const PROJECTS_HEAD: ElementId = 4;
const PROJECT_GRID: ElementId = 5;
const CONTACT: ElementId = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    HeroName,
    Heading,
    Title,
    Text,
    Muted,
}

#[derive(Debug)]
struct Line {
    text: String,
    kind: LineKind,
    /// Child index for staggered blocks; `None` targets the block itself.
    child: Option<u32>,
}

#[derive(Debug)]
struct Block {
    element: ElementId,
    top: usize,
    lines: Vec<Line>,
}

#[derive(Debug)]
struct Layout {
    blocks: Vec<Block>,
    section_bounds: HashMap<IdStr, SectionBounds>,
    total_rows: usize,
}

impl Layout {
    fn element_bounds(&self, element: ElementId) -> Option<ElementBounds> {
        self.blocks
            .iter()
            .find(|b| b.element == element)
            .map(|b| ElementBounds::new(b.top as f64, b.lines.len() as f64))
    }
}

/// The terminal's view of the ambient scroll/layout state, in rows and
/// columns.
struct TerminalGeometry<'a> {
    layout: &'a Layout,
    scroll_y: f64,
    cols: f64,
    rows: f64,
}

impl GeometryProvider for TerminalGeometry<'_> {
    fn section_bounds(&self) -> HashMap<IdStr, SectionBounds> {
        self.layout.section_bounds.clone()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.cols
    }

    fn viewport_height(&self) -> f64 {
        self.rows
    }
}

/// Styles the core's commands have assigned so far.
#[derive(Debug, Default)]
struct AppliedStyles {
    /// (element, child) → absolute time the target becomes visible.
    reveal_at: HashMap<(ElementId, Option<u32>), f64>,
    /// element → current parallax translation in rows.
    translate: HashMap<ElementId, f64>,
}

impl AppliedStyles {
    fn apply(&mut self, command: &UiCommand, now_ms: f64) {
        match command {
            UiCommand::AddClass { target, .. } => {
                // The class itself has no terminal equivalent; record the
                // assignment so timing can attach to it.
                self.reveal_at
                    .entry((target.element, target.child))
                    .or_insert(now_ms);
            }
            UiCommand::SetAnimationTiming { target, delay_ms, .. } => {
                self.reveal_at
                    .insert((target.element, target.child), now_ms + delay_ms);
            }
            UiCommand::SetTranslateY { target, offset_px } => {
                self.translate.insert(target.element, *offset_px);
            }
            // Polling host: there is no native observer to disconnect.
            UiCommand::Unobserve { .. } => {}
            // Handled by the key handler, which owns the scroll state.
            UiCommand::ScrollToSection { .. } => {}
        }
    }

    fn is_shown(&self, element: ElementId, child: Option<u32>, now_ms: f64) -> bool {
        self.reveal_at
            .get(&(element, child))
            .is_some_and(|at| now_ms >= *at)
    }
}

pub fn run(portfolio: &Portfolio) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, portfolio);

    // Teardown runs on every exit path, including an error inside the loop.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn sections() -> Vec<Section> {
    vec![
        Section::new("home", "Home", 0),
        Section::new("about", "About", 1),
        Section::new("projects", "Projects", 2),
        Section::new("contact", "Contact", 3),
    ]
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    portfolio: &Portfolio,
) -> Result<()> {
    let start = Instant::now();

    let mut tracker =
        SectionTracker::new(sections())?.with_viewport_chrome(0.0, TRIGGER_LEAD_ROWS);
    let mut reveals = VisibilityEngine::with_thresholds(0.1, REVEAL_MARGIN_ROWS);
    let mut parallax = ParallaxRegistry::with_min_viewport_width(PARALLAX_MIN_COLS);
    let mut coalescer = ScrollCoalescer::default();
    let mut styles = AppliedStyles::default();

    let mut width = terminal.size()?.width;
    let mut layout = build_layout(portfolio, width);

    register_elements(&mut reveals, &mut parallax, &layout);

    let mut scroll_y: f64 = 0.0;
    let mut scroll_target: Option<f64> = None;

    loop {
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        let size = terminal.size()?;
        if size.width != width {
            // Resize: fresh geometry, same fired/parallax state.
            width = size.width;
            layout = build_layout(portfolio, width);
        }
        let view_rows = f64::from(size.height.saturating_sub(NAV_ROWS));

        // Host-native smooth scroll: exponential ease toward the target.
        if let Some(target) = scroll_target {
            scroll_y += (target - scroll_y) * 0.35;
            if (target - scroll_y).abs() < 0.5 {
                scroll_y = target;
                scroll_target = None;
            }
        }
        let max_scroll = (layout.total_rows as f64 - view_rows).max(0.0);
        scroll_y = scroll_y.clamp(0.0, max_scroll);

        if coalescer.poll(now_ms) {
            let geometry = TerminalGeometry {
                layout: &layout,
                scroll_y,
                cols: f64::from(size.width),
                rows: view_rows,
            };
            let frame = geometry.scroll_frame();
            tracker.on_scroll(&frame, &geometry.section_bounds());
            for command in reveals.on_frame(&frame, |id| layout.element_bounds(id)) {
                styles.apply(&command, now_ms);
            }
            for command in parallax.on_frame(&frame, |id| layout.element_bounds(id)) {
                styles.apply(&command, now_ms);
            }
        }

        let active = tracker.current_active_section().clone();
        terminal.draw(|frame| {
            draw(frame, &layout, &tracker, &active, &styles, scroll_y, now_ms);
        })?;

        if event::poll(std::time::Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up => {
                        scroll_target = None;
                        scroll_y -= 2.0;
                    }
                    KeyCode::Down => {
                        scroll_target = None;
                        scroll_y += 2.0;
                    }
                    KeyCode::PageUp => {
                        scroll_target = None;
                        scroll_y -= view_rows - 2.0;
                    }
                    KeyCode::PageDown => {
                        scroll_target = None;
                        scroll_y += view_rows - 2.0;
                    }
                    KeyCode::Home => scroll_target = Some(0.0),
                    KeyCode::End => scroll_target = Some(max_scroll),
                    KeyCode::Char(c @ '1'..='9') => {
                        let index = (c as usize) - ('1' as usize);
                        let id = tracker.sections().get(index).map(|s| s.id.clone());
                        if let Some(id) = id
                            && let Some(UiCommand::ScrollToSection { id }) =
                                tracker.request_scroll_to(&id)
                            && let Some(bounds) = layout.section_bounds.get(id.as_str())
                        {
                            scroll_target = Some(bounds.top);
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => {
                        scroll_target = None;
                        scroll_y += 3.0;
                    }
                    MouseEventKind::ScrollUp => {
                        scroll_target = None;
                        scroll_y -= 3.0;
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    Ok(())
}

fn register_elements(
    reveals: &mut VisibilityEngine,
    parallax: &mut ParallaxRegistry,
    layout: &Layout,
) {
    let fade = |name: &str| AnimationConfig {
        name: name.into(),
        ..AnimationConfig::default()
    };
    reveals.register(HERO, fade("fade-in"), 0);
    reveals.register(ABOUT, fade("fade-in-up"), 0);
    reveals.register(
        SKILLS,
        AnimationConfig {
            stagger: true,
            stagger_delay_ms: 80.0,
            ..AnimationConfig::default()
        },
        layout
            .blocks
            .iter()
            .find(|b| b.element == SKILLS)
            .map_or(0, |b| b.lines.len() as u32),
    );
    reveals.register(PROJECTS_HEAD, fade("fade-in"), 0);
    let card_count = layout
        .blocks
        .iter()
        .find(|b| b.element == PROJECT_GRID)
        .and_then(|b| b.lines.iter().filter_map(|l| l.child).max())
        .map_or(0, |max| max + 1);
    reveals.register(
        PROJECT_GRID,
        AnimationConfig {
            stagger: true,
            stagger_delay_ms: 120.0,
            ..AnimationConfig::default()
        },
        card_count,
    );
    reveals.register(CONTACT, fade("fade-in-up"), 0);

    // The hero drifts slightly as it scrolls away.
    parallax.register(HERO, ParallaxConfig::new(0.3, 2.0, 0.0));
}

fn draw(
    frame: &mut ratatui::Frame<'_>,
    layout: &Layout,
    tracker: &SectionTracker,
    active: &IdStr,
    styles: &AppliedStyles,
    scroll_y: f64,
    now_ms: f64,
) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    // Navigation bar.
    let mut x = 1u16;
    buf.set_string(x, 0, "folio", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
    x += 7;
    for (index, section) in tracker.sections().iter().enumerate() {
        let label = format!(" [{}] {} ", index + 1, section.label);
        let style = if section.id == *active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if x + label.len() as u16 >= area.width {
            break;
        }
        buf.set_string(x, 0, &label, style);
        x += label.len() as u16;
    }
    let hint = "↑/↓ scroll · 1-4 jump · q quit";
    if area.width > hint.len() as u16 + 1 {
        buf.set_string(
            area.width - hint.len() as u16 - 1,
            1,
            hint,
            Style::default().fg(Color::DarkGray),
        );
    }

    // Content rows below the bar.
    for block in &layout.blocks {
        let offset = styles.translate.get(&block.element).copied().unwrap_or(0.0);
        for (i, line) in block.lines.iter().enumerate() {
            if !styles.is_shown(block.element, line.child, now_ms)
                && !styles.is_shown(block.element, None, now_ms)
            {
                continue;
            }
            let doc_row = block.top as f64 + i as f64 + offset;
            let screen = doc_row - scroll_y + f64::from(NAV_ROWS);
            if screen < f64::from(NAV_ROWS) || screen >= f64::from(area.height) {
                continue;
            }
            let style = match line.kind {
                LineKind::HeroName => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                LineKind::Heading => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                LineKind::Title => Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                LineKind::Text => Style::default().fg(Color::Gray),
                LineKind::Muted => Style::default().fg(Color::DarkGray),
            };
            buf.set_string(2, screen as u16, &line.text, style);
        }
    }
}

/// Greedy word wrap; blank input paragraphs survive as blank lines.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}

fn build_layout(portfolio: &Portfolio, term_width: u16) -> Layout {
    let width = (term_width as usize).saturating_sub(6).clamp(32, 76);
    let mut blocks = Vec::new();
    let mut section_bounds = HashMap::new();
    let mut row = 0usize;

    let text = |s: &str, kind: LineKind| Line {
        text: s.to_string(),
        kind,
        child: None,
    };

    // --- home ---
    let home_top = row;
    let profile = &portfolio.profile;
    let mut hero_lines = vec![
        text("", LineKind::Text),
        text(&profile.name, LineKind::HeroName),
        text(&profile.title, LineKind::Title),
        text("", LineKind::Text),
    ];
    for l in wrap(&profile.tagline, width) {
        hero_lines.push(text(&l, LineKind::Text));
    }
    hero_lines.push(text("", LineKind::Text));
    hero_lines.push(text("scroll for more ↓", LineKind::Muted));
    while hero_lines.len() < 14 {
        hero_lines.push(text("", LineKind::Text));
    }
    blocks.push(Block {
        element: HERO,
        top: row,
        lines: hero_lines,
    });
    row += blocks.last().map_or(0, |b| b.lines.len());
    section_bounds.insert(
        IdStr::from("home"),
        SectionBounds::new(home_top as f64, row as f64),
    );

    // --- about ---
    let about_top = row;
    let mut about_lines = vec![
        text("ABOUT", LineKind::Heading),
        text("", LineKind::Text),
    ];
    for l in wrap(&profile.bio, width) {
        about_lines.push(text(&l, LineKind::Text));
    }
    about_lines.push(text("", LineKind::Text));
    blocks.push(Block {
        element: ABOUT,
        top: row,
        lines: about_lines,
    });
    row += blocks.last().map_or(0, |b| b.lines.len());

    // Skills grouped by category, one staggered line per group.
    let mut skill_lines = Vec::new();
    let categories = [
        (SkillCategory::Frontend, "frontend"),
        (SkillCategory::Backend, "backend"),
        (SkillCategory::Tools, "tools"),
        (SkillCategory::Other, "other"),
    ];
    for (category, label) in categories {
        let names: Vec<&str> = profile
            .skills
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.name.as_str())
            .collect();
        if names.is_empty() {
            continue;
        }
        skill_lines.push(Line {
            text: format!("  {label:<10} {}", names.join(" · ")),
            kind: LineKind::Text,
            child: Some(skill_lines.len() as u32),
        });
    }
    if !skill_lines.is_empty() {
        blocks.push(Block {
            element: SKILLS,
            top: row,
            lines: skill_lines,
        });
        row += blocks.last().map_or(0, |b| b.lines.len());
    }
    row += 2;
    section_bounds.insert(
        IdStr::from("about"),
        SectionBounds::new(about_top as f64, row as f64),
    );

    // --- projects ---
    let projects_top = row;
    blocks.push(Block {
        element: PROJECTS_HEAD,
        top: row,
        lines: vec![
            text("PROJECTS", LineKind::Heading),
            text("", LineKind::Text),
        ],
    });
    row += 2;

    let mut grid_lines = Vec::new();
    for (index, project) in portfolio.projects.iter().enumerate() {
        let child = Some(index as u32);
        let star = if project.featured { " ★" } else { "" };
        grid_lines.push(Line {
            text: format!("{}{}", project.title, star),
            kind: LineKind::Title,
            child,
        });
        for l in wrap(&project.short_description, width) {
            grid_lines.push(Line {
                text: format!("  {l}"),
                kind: LineKind::Text,
                child,
            });
        }
        grid_lines.push(Line {
            text: format!("  {}", project.technologies.join(" · ")),
            kind: LineKind::Muted,
            child,
        });
        if let Some(url) = project.source_url.as_deref().or(project.live_url.as_deref()) {
            grid_lines.push(Line {
                text: format!("  {url}"),
                kind: LineKind::Muted,
                child,
            });
        }
        grid_lines.push(Line {
            text: String::new(),
            kind: LineKind::Text,
            child,
        });
    }
    blocks.push(Block {
        element: PROJECT_GRID,
        top: row,
        lines: grid_lines,
    });
    row += blocks.last().map_or(0, |b| b.lines.len());
    row += 1;
    section_bounds.insert(
        IdStr::from("projects"),
        SectionBounds::new(projects_top as f64, row as f64),
    );

    // --- contact ---
    let contact_top = row;
    let mut contact_lines = vec![
        text("CONTACT", LineKind::Heading),
        text("", LineKind::Text),
        text(&format!("email  {}", profile.email), LineKind::Text),
    ];
    for link in &profile.social_links {
        contact_lines.push(Line {
            text: format!("{:<6} {}", link.platform.to_lowercase(), link.url),
            kind: LineKind::Text,
            child: None,
        });
    }
    contact_lines.push(text("", LineKind::Text));
    contact_lines.push(text(
        &format!("— {} · rendered by folio", profile.name),
        LineKind::Muted,
    ));
    while contact_lines.len() < 10 {
        contact_lines.push(text("", LineKind::Text));
    }
    blocks.push(Block {
        element: CONTACT,
        top: row,
        lines: contact_lines,
    });
    row += blocks.last().map_or(0, |b| b.lines.len());
    section_bounds.insert(
        IdStr::from("contact"),
        SectionBounds::new(contact_top as f64, row as f64),
    );

    Layout {
        blocks,
        section_bounds,
        total_rows: row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Portfolio {
        folio_core::parse_portfolio(crate::SAMPLE_PORTFOLIO)
            .expect("built-in sample should always parse")
    }

    #[test]
    fn layout_sections_are_contiguous() {
        let layout = build_layout(&sample(), 100);
        let home = layout.section_bounds["home"];
        let about = layout.section_bounds["about"];
        let projects = layout.section_bounds["projects"];
        let contact = layout.section_bounds["contact"];
        assert!((home.bottom - about.top).abs() < f64::EPSILON);
        assert!((about.bottom - projects.top).abs() < f64::EPSILON);
        assert!((projects.bottom - contact.top).abs() < f64::EPSILON);
        assert!((contact.bottom - layout.total_rows as f64).abs() < f64::EPSILON);
    }

    #[test]
    fn grid_children_follow_project_order() {
        let portfolio = sample();
        let layout = build_layout(&portfolio, 100);
        let grid = layout
            .blocks
            .iter()
            .find(|b| b.element == PROJECT_GRID)
            .expect("grid block exists");
        let max_child = grid.lines.iter().filter_map(|l| l.child).max();
        assert_eq!(max_child, Some(portfolio.projects.len() as u32 - 1));
    }

    #[test]
    fn wrap_preserves_blank_paragraphs() {
        let lines = wrap("one two\n\nthree", 20);
        assert_eq!(lines, vec!["one two", "", "three"]);
    }

    #[test]
    fn wrap_breaks_long_text() {
        let lines = wrap("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }
}
