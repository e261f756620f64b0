//! Wizard application state, key handling and rendering.
//!
//! Layout: header | error | step body | footer. The step body is the
//! description editor, the generation spinner, or the review form.

use crate::event::{is_cancel, is_ctrl, typed_char};
use claw_api::{ApiError, GeneratedProfile};
use claw_core::{
    description_examples, AgentDraft, CreationRequest, Field, GenerationRequest, RequestToken,
    Settled, WizardMode, WizardSession, WizardStep,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

// ── Theme ──────────────────────────────────────────────────────────────

const COLOR_ACCENT: Color = Color::Rgb(166, 227, 161); // Green
const COLOR_ERROR: Color = Color::Rgb(243, 139, 168); // Red/Maroon
const COLOR_SYSTEM: Color = Color::Rgb(250, 179, 135); // Peach
const COLOR_THINKING: Color = Color::Rgb(108, 112, 134); // Overlay0
const COLOR_HEADER_BG: Color = Color::Rgb(24, 24, 37); // Mantle
const COLOR_BAR_FG: Color = Color::Rgb(147, 153, 178); // Overlay1
const COLOR_BORDER: Color = Color::Rgb(49, 50, 68); // Surface0
const COLOR_DIM: Color = Color::Rgb(88, 91, 112); // Overlay0

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];

const DESCRIBE_INSTRUCTION: &str = "Describe what this agent should do. Be specific about its role, \
capabilities, and any special requirements.";
const DESCRIBE_PLACEHOLDER: &str = "Example: A development agent that specializes in React and \
TypeScript. It should follow best practices, write tests, and document code thoroughly...";
const ORCHESTRATOR_INTRO: &str = "This is your main orchestrator agent. It will coordinate tasks \
and manage your agent team. Review the configuration below and customize as needed.";

// ── State ──────────────────────────────────────────────────────────────

/// What the runner must do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Generate(GenerationRequest),
    Create(CreationRequest),
    Quit,
}

/// How the wizard ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The backend accepted this draft.
    Created(AgentDraft),
    /// The wizard was closed while this draft's creation call was still
    /// in flight, and no answer arrived afterwards.
    Unconfirmed(AgentDraft),
    /// The operator closed the wizard.
    Cancelled,
}

pub struct WizardApp {
    pub session: WizardSession,
    pub running: bool,
    pub focus: Field,
    pub tick: u16,
    pub outcome: Option<WizardOutcome>,
    submitted: Option<CreationRequest>,
}

impl WizardApp {
    pub fn new(session: WizardSession) -> Self {
        Self {
            session,
            running: true,
            focus: Field::Id,
            tick: 0,
            outcome: None,
            submitted: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.session.mode() {
            WizardMode::Orchestrator => "🎯 Initialize Orchestrator",
            WizardMode::Standard => "✨ Create New Agent",
        }
    }

    pub fn step_label(&self) -> &'static str {
        match (self.session.step(), self.session.mode()) {
            (WizardStep::Describe, _) => "Step 1 of 2",
            (WizardStep::Loading, _) => "Generating...",
            (WizardStep::Review, WizardMode::Orchestrator) => "Review & Create",
            (WizardStep::Review, WizardMode::Standard) => "Step 2 of 2",
        }
    }

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn spinner(&self) -> &'static str {
        SPINNER[usize::from(self.tick / 3) % SPINNER.len()]
    }

    // ── Key handling ───────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if is_cancel(&key) {
            self.cancel();
            return Action::Quit;
        }
        match self.session.step() {
            WizardStep::Describe => self.handle_describe_key(key),
            WizardStep::Loading => Action::None,
            WizardStep::Review => self.handle_review_key(key),
        }
    }

    fn handle_describe_key(&mut self, key: KeyEvent) -> Action {
        if is_ctrl(&key, 'j') {
            self.edit_description(|text| text.push('\n'));
            return Action::None;
        }
        match key.code {
            KeyCode::Enter => match self.session.submit_description() {
                Ok(request) => Action::Generate(request),
                Err(err) => {
                    tracing::debug!(error = %err, "generate refused");
                    Action::None
                }
            },
            KeyCode::Backspace => {
                self.edit_description(|text| {
                    text.pop();
                });
                Action::None
            }
            KeyCode::F(n @ 1..=3) => {
                if let Some(example) = description_examples().get(usize::from(n - 1)) {
                    self.edit_description(|text| *text = example.text.to_string());
                }
                Action::None
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    self.edit_description(|text| text.push(c));
                }
                Action::None
            }
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent) -> Action {
        if is_ctrl(&key, 's') {
            return match self.session.submit_creation() {
                Ok(request) => {
                    self.submitted = Some(request.clone());
                    Action::Create(request)
                }
                Err(err) => {
                    tracing::debug!(error = %err, "create refused");
                    Action::None
                }
            };
        }
        if is_ctrl(&key, 'r') {
            if self.session.can_refine() {
                if let Err(err) = self.session.refine() {
                    tracing::debug!(error = %err, "refine refused");
                }
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Left if self.focus == Field::Model => self.cycle_model(false),
            KeyCode::Right if self.focus == Field::Model => self.cycle_model(true),
            KeyCode::Enter if self.focus.is_document() => self.edit_focused(|value| value.push('\n')),
            KeyCode::Enter => self.focus_next(),
            KeyCode::Backspace if self.focus != Field::Model => self.edit_focused(|value| {
                value.pop();
            }),
            _ => {
                if let Some(c) = typed_char(&key) {
                    if self.focus != Field::Model {
                        self.edit_focused(|value| value.push(c));
                    }
                }
            }
        }
        Action::None
    }

    fn edit_description(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.session.description().to_string();
        edit(&mut text);
        if let Err(err) = self.session.set_description(text) {
            tracing::debug!(error = %err, "description edit refused");
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let mut value = self.session.field(self.focus).to_string();
        edit(&mut value);
        if let Err(err) = self.session.set_field(self.focus, value) {
            tracing::debug!(field = ?self.focus, error = %err, "field edit refused");
        }
    }

    fn focus_next(&mut self) {
        let index = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = Field::ALL[(index + 1) % Field::ALL.len()];
    }

    fn focus_prev(&mut self) {
        let index = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = Field::ALL[(index + Field::ALL.len() - 1) % Field::ALL.len()];
    }

    /// Step through "no model" followed by every catalog entry.
    fn cycle_model(&mut self, forward: bool) {
        let mut options = vec![String::new()];
        options.extend(self.session.models().iter().map(|model| model.id.clone()));
        let current = self.session.field(Field::Model);
        let next = match options.iter().position(|id| id == current) {
            Some(index) if forward => (index + 1) % options.len(),
            Some(index) => (index + options.len() - 1) % options.len(),
            None => 0,
        };
        if let Err(err) = self.session.set_model(options[next].clone()) {
            tracing::debug!(error = %err, "model selection refused");
        }
    }

    /// Close the session; any result still in flight will be ignored.
    pub fn cancel(&mut self) {
        self.running = false;
        if self.session.is_closed() {
            return;
        }
        if !self.session.is_creating() {
            self.submitted = None;
        }
        let outcome = match &self.submitted {
            Some(request) => WizardOutcome::Unconfirmed(request.draft.clone()),
            None => WizardOutcome::Cancelled,
        };
        self.session.close();
        self.outcome.get_or_insert(outcome);
    }

    /// Token of a creation call abandoned by [`cancel`](Self::cancel) whose
    /// answer is still unknown.
    pub fn unconfirmed_creation(&self) -> Option<RequestToken> {
        match (&self.outcome, &self.submitted) {
            (Some(WizardOutcome::Unconfirmed(_)), Some(request)) => Some(request.token),
            _ => None,
        }
    }

    /// Settle an abandoned creation once its answer arrives. The session is
    /// already closed, so only the outcome changes.
    pub fn on_unconfirmed_created(&mut self, token: RequestToken, result: Result<(), ApiError>) {
        if self.unconfirmed_creation() != Some(token) {
            return;
        }
        let Some(request) = self.submitted.take() else {
            return;
        };
        self.outcome = Some(match result {
            Ok(()) => WizardOutcome::Created(request.draft),
            Err(err) => {
                tracing::warn!(?token, error = %err, "abandoned creation failed");
                WizardOutcome::Cancelled
            }
        });
    }

    // ── Call results ───────────────────────────────────────────────────

    pub fn on_generated(&mut self, token: RequestToken, result: Result<GeneratedProfile, ApiError>) {
        if self.session.finish_generation(token, result) == Settled::Applied {
            self.focus = Field::Id;
        }
    }

    pub fn on_created(&mut self, token: RequestToken, result: Result<(), ApiError>) {
        if self.session.finish_creation(token, result) == Settled::Finished {
            self.running = false;
            let draft = self
                .submitted
                .take()
                .map(|request| request.draft)
                .unwrap_or_default();
            self.outcome = Some(WizardOutcome::Created(draft));
        }
    }

    // ── Rendering ──────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT))
            .border_type(BorderType::Thick)
            .title(" claw ")
            .title_style(Style::default().fg(COLOR_ACCENT).bold());
        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let error_height = if self.session.error().is_some() { 2 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(error_height),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_header(frame, chunks[0]);
        if let Some(error) = self.session.error() {
            let line = Line::from(vec![
                Span::styled(" ⚠ ", Style::default().fg(COLOR_ERROR).bold()),
                Span::styled(error.to_string(), Style::default().fg(COLOR_ERROR)),
            ]);
            frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), chunks[1]);
        }
        match self.session.step() {
            WizardStep::Describe => self.render_describe(frame, chunks[2]),
            WizardStep::Loading => self.render_loading(frame, chunks[2]),
            WizardStep::Review => self.render_review(frame, chunks[2]),
        }
        self.render_footer(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let busy = self.session.pending().is_some();
        let (indicator, color) = if busy {
            (self.spinner(), COLOR_THINKING)
        } else {
            ("●", COLOR_ACCENT)
        };

        let left = vec![
            Span::styled(format!(" {indicator} "), Style::default().fg(color)),
            Span::styled(self.title(), Style::default().fg(COLOR_ACCENT).bold()),
        ];
        let right = format!("{} ", self.step_label());
        let used: usize = left.iter().map(|s| s.width()).sum::<usize>() + right.len();
        let pad = (area.width as usize).saturating_sub(used);

        let mut spans = left;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(right, Style::default().fg(COLOR_BAR_FG)));

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(COLOR_HEADER_BG));
        frame.render_widget(bar, area);
    }

    fn render_describe(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(DESCRIBE_INSTRUCTION)
                .style(Style::default().fg(COLOR_BAR_FG))
                .wrap(Wrap { trim: true }),
            chunks[0],
        );

        let description = self.session.description();
        let text = if description.is_empty() {
            Text::styled(DESCRIBE_PLACEHOLDER, Style::default().fg(COLOR_DIM).italic())
        } else {
            Text::raw(format!("{description}▏"))
        };
        let editor = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((Self::tail_scroll(description, chunks[1].height), 0))
            .block(Self::field_block(" Description ", true));
        frame.render_widget(editor, chunks[1]);

        let mut spans = vec![Span::styled(" Examples: ", Style::default().fg(COLOR_DIM))];
        for (index, example) in description_examples().iter().enumerate() {
            spans.push(Span::styled(
                format!(" F{} ", index + 1),
                Style::default().fg(Color::Black).bg(COLOR_SYSTEM),
            ));
            spans.push(Span::styled(
                format!(" {}  ", example.label),
                Style::default().fg(COLOR_SYSTEM),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[2]);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);
        let line = Line::from(Span::styled(
            format!("{} Generating agent configuration...", self.spinner()),
            Style::default().fg(COLOR_THINKING).italic(),
        ));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), vertical[1]);
    }

    fn render_review(&self, frame: &mut Frame, area: Rect) {
        let intro_height = if self.session.mode().is_orchestrator() { 3 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(intro_height),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(9),
            ])
            .split(area);

        if intro_height > 0 {
            frame.render_widget(
                Paragraph::new(ORCHESTRATOR_INTRO)
                    .style(Style::default().fg(COLOR_BAR_FG))
                    .wrap(Wrap { trim: true }),
                rows[0],
            );
        }

        let identity = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(12)])
            .split(rows[1]);
        self.render_field(frame, identity[0], Field::Id);
        self.render_field(frame, identity[1], Field::Emoji);

        let naming = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        self.render_field(frame, naming[0], Field::Name);
        self.render_field(frame, naming[1], Field::Model);

        let documents = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(rows[3]);
        self.render_field(frame, documents[0], Field::Soul);
        self.render_field(frame, documents[1], Field::Tools);
        self.render_field(frame, documents[2], Field::AgentsMd);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: Field) {
        let focused = self.focus == field && !self.session.is_creating();
        let value = self.session.field(field);
        let placeholder = match field {
            Field::Id => "my-agent",
            Field::Name => "Agent Name",
            Field::Emoji => "🤖",
            Field::Model => "Select model...",
            _ => "",
        };

        let mut block = Self::field_block(&format!(" {} ", field.label()), focused);
        if field == Field::Id {
            block = block.title_bottom(Line::styled(
                " Lowercase, hyphens allowed ",
                Style::default().fg(COLOR_DIM),
            ));
        }
        if field == Field::Model && focused {
            block = block.title_bottom(Line::styled(" ←/→ ", Style::default().fg(COLOR_DIM)));
        }

        let text = if value.is_empty() {
            Text::styled(placeholder, Style::default().fg(COLOR_DIM))
        } else if focused && field != Field::Model {
            Text::raw(format!("{value}▏"))
        } else {
            Text::raw(value.to_string())
        };

        let scroll = if focused {
            Self::tail_scroll(value, area.height)
        } else {
            0
        };
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &str| Span::styled(format!(" {k} "), Style::default().fg(Color::Black).bg(COLOR_BAR_FG));
        let label = |text: &str, enabled: bool| {
            let color = if enabled { COLOR_BAR_FG } else { COLOR_DIM };
            Span::styled(format!(" {text}   "), Style::default().fg(color))
        };

        let mut spans = Vec::new();
        match self.session.step() {
            WizardStep::Describe => {
                spans.extend([key("Esc"), label("Cancel", true)]);
                spans.extend([key("^J"), label("Newline", true)]);
                spans.extend([
                    key("Enter"),
                    label("✦ Generate Config", self.session.can_generate()),
                ]);
            }
            WizardStep::Loading => {
                spans.extend([key("Esc"), label("Cancel", true)]);
            }
            WizardStep::Review => {
                if self.session.mode().allows_refine() {
                    spans.extend([key("^R"), label("← Refine", self.session.can_refine())]);
                }
                spans.extend([key("Tab"), label("Next field", true)]);
                spans.extend([key("Esc"), label("Cancel", true)]);
                let create = if self.session.is_creating() {
                    "Creating..."
                } else {
                    "🚀 Create Agent"
                };
                spans.extend([key("^S"), label(create, self.session.can_create())]);
            }
        }

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(COLOR_HEADER_BG));
        frame.render_widget(bar, area);
    }

    fn field_block(title: &str, focused: bool) -> Block<'static> {
        let color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Span::styled(title.to_string(), Style::default().fg(COLOR_BAR_FG)))
    }

    /// Scroll offset that keeps the last line of `text` visible in a
    /// bordered box of `height` rows.
    fn tail_scroll(text: &str, height: u16) -> u16 {
        let visible = height.saturating_sub(2);
        let lines = u16::try_from(text.split('\n').count()).unwrap_or(u16::MAX);
        lines.saturating_sub(visible)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use claw_api::ModelInfo;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut WizardApp, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn standard() -> WizardApp {
        WizardApp::new(WizardSession::open(
            WizardMode::Standard,
            vec![ModelInfo::new("gpt-x"), ModelInfo::new("claude")],
        ))
    }

    fn reviewing() -> WizardApp {
        let mut app = standard();
        type_text(&mut app, "A backend agent");
        let Action::Generate(request) = app.handle_key(press(KeyCode::Enter)) else {
            panic!("expected a generation request");
        };
        app.on_generated(
            request.token,
            Ok(GeneratedProfile {
                id: Some("backend-1".to_string()),
                ..Default::default()
            }),
        );
        app
    }

    fn screen(app: &WizardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_typing_and_generate() {
        let mut app = standard();
        type_text(&mut app, "A backend agent");
        assert_eq!(app.session.description(), "A backend agent");
        let action = app.handle_key(press(KeyCode::Enter));
        assert!(matches!(action, Action::Generate(ref r) if r.description == "A backend agent"));
        assert_eq!(app.session.step(), WizardStep::Loading);
        assert_eq!(app.step_label(), "Generating...");
    }

    #[test]
    fn test_blank_generate_shows_error() {
        let mut app = standard();
        assert_eq!(app.handle_key(press(KeyCode::Enter)), Action::None);
        assert_eq!(app.session.step(), WizardStep::Describe);
        assert_eq!(
            app.session.error(),
            Some("Please describe what the agent should do")
        );
    }

    #[test]
    fn test_function_keys_pick_examples() {
        let mut app = standard();
        type_text(&mut app, "draft");
        app.handle_key(press(KeyCode::F(2)));
        assert_eq!(
            app.session.description(),
            "A sales agent that handles lead qualification, outreach emails, and CRM management"
        );
    }

    #[test]
    fn test_ctrl_j_inserts_newline_and_backspace_removes() {
        let mut app = standard();
        type_text(&mut app, "a");
        app.handle_key(ctrl('j'));
        type_text(&mut app, "b");
        assert_eq!(app.session.description(), "a\nb");
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.session.description(), "a\n");
    }

    #[test]
    fn test_id_typing_is_normalized() {
        let mut app = reviewing();
        assert_eq!(app.focus, Field::Id);
        for _ in 0.."backend-1".len() {
            app.handle_key(press(KeyCode::Backspace));
        }
        type_text(&mut app, "My Agent!");
        assert_eq!(app.session.field(Field::Id), "my-agent-");
    }

    #[test]
    fn test_tab_cycles_fields() {
        let mut app = reviewing();
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus, Field::Emoji);
        app.handle_key(press(KeyCode::BackTab));
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.focus, Field::AgentsMd);
    }

    #[test]
    fn test_model_cycles_through_catalog() {
        let mut app = reviewing();
        app.focus = Field::Model;
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.session.field(Field::Model), "gpt-x");
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.session.field(Field::Model), "claude");
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.session.field(Field::Model), "");
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.session.field(Field::Model), "claude");
        type_text(&mut app, "zzz");
        assert_eq!(app.session.field(Field::Model), "claude");
    }

    #[test]
    fn test_enter_in_document_adds_newline() {
        let mut app = reviewing();
        app.focus = Field::Soul;
        type_text(&mut app, "line");
        app.handle_key(press(KeyCode::Enter));
        type_text(&mut app, "two");
        assert_eq!(app.session.field(Field::Soul), "line\ntwo");
        assert_eq!(app.focus, Field::Soul);
    }

    #[test]
    fn test_refine_returns_to_describe() {
        let mut app = reviewing();
        app.handle_key(ctrl('r'));
        assert_eq!(app.session.step(), WizardStep::Describe);
        assert_eq!(app.session.description(), "A backend agent\n\n[Refinement]: ");
    }

    #[test]
    fn test_orchestrator_has_no_refine() {
        let mut app = WizardApp::new(WizardSession::open(WizardMode::Orchestrator, Vec::new()));
        assert_eq!(app.title(), "🎯 Initialize Orchestrator");
        assert_eq!(app.step_label(), "Review & Create");
        app.handle_key(ctrl('r'));
        assert_eq!(app.session.step(), WizardStep::Review);
        assert!(!screen(&app).contains("Refine"));
    }

    #[test]
    fn test_create_success_ends_with_outcome() {
        let mut app = reviewing();
        let Action::Create(request) = app.handle_key(ctrl('s')) else {
            panic!("expected a creation request");
        };
        assert!(screen(&app).contains("Creating..."));
        app.on_created(request.token, Ok(()));
        assert!(!app.running);
        let Some(WizardOutcome::Created(draft)) = &app.outcome else {
            panic!("expected created outcome");
        };
        assert_eq!(draft.id, "backend-1");
    }

    #[test]
    fn test_create_failure_keeps_app_running() {
        let mut app = reviewing();
        let Action::Create(request) = app.handle_key(ctrl('s')) else {
            panic!("expected a creation request");
        };
        app.on_created(
            request.token,
            Err(ApiError::Rejected {
                status: 409,
                detail: Some("id already exists".to_string()),
            }),
        );
        assert!(app.running);
        assert_eq!(app.session.error(), Some("id already exists"));
        assert!(screen(&app).contains("id already exists"));
    }

    #[test]
    fn test_escape_cancels_and_ignores_late_result() {
        let mut app = standard();
        type_text(&mut app, "agent");
        let Action::Generate(request) = app.handle_key(press(KeyCode::Enter)) else {
            panic!("expected a generation request");
        };
        assert_eq!(app.handle_key(press(KeyCode::Esc)), Action::Quit);
        assert_eq!(app.outcome, Some(WizardOutcome::Cancelled));
        app.on_generated(request.token, Ok(GeneratedProfile::default()));
        assert!(app.session.is_closed());
        assert!(app.session.draft().is_none());
    }

    #[test]
    fn test_escape_during_creation_leaves_outcome_unconfirmed() {
        let mut app = reviewing();
        let Action::Create(request) = app.handle_key(ctrl('s')) else {
            panic!("expected a creation request");
        };
        assert_eq!(app.handle_key(press(KeyCode::Esc)), Action::Quit);
        assert!(matches!(
            app.outcome,
            Some(WizardOutcome::Unconfirmed(ref draft)) if draft.id == "backend-1"
        ));
        assert_eq!(app.unconfirmed_creation(), Some(request.token));

        app.on_created(request.token, Ok(()));
        assert!(matches!(app.outcome, Some(WizardOutcome::Unconfirmed(_))));

        app.on_unconfirmed_created(request.token, Ok(()));
        assert!(matches!(
            app.outcome,
            Some(WizardOutcome::Created(ref draft)) if draft.id == "backend-1"
        ));
        assert_eq!(app.unconfirmed_creation(), None);
    }

    #[test]
    fn test_failed_abandoned_creation_is_cancelled() {
        let mut app = reviewing();
        let Action::Create(request) = app.handle_key(ctrl('s')) else {
            panic!("expected a creation request");
        };
        app.cancel();
        app.on_unconfirmed_created(
            request.token,
            Err(ApiError::Rejected {
                status: 409,
                detail: None,
            }),
        );
        assert_eq!(app.outcome, Some(WizardOutcome::Cancelled));
    }

    #[test]
    fn test_escape_after_failed_creation_is_cancelled() {
        let mut app = reviewing();
        let Action::Create(request) = app.handle_key(ctrl('s')) else {
            panic!("expected a creation request");
        };
        app.on_created(request.token, Err(ApiError::Auth("denied".to_string())));
        app.cancel();
        assert_eq!(app.outcome, Some(WizardOutcome::Cancelled));
        assert_eq!(app.unconfirmed_creation(), None);
    }

    #[test]
    fn test_render_describe_step() {
        let app = standard();
        let text = screen(&app);
        assert!(text.contains("Step 1 of 2"));
        assert!(text.contains("Backend Dev"));
        assert!(text.contains("Researcher"));
    }

    #[test]
    fn test_render_review_labels() {
        let app = reviewing();
        let text = screen(&app);
        assert!(text.contains("Step 2 of 2"));
        assert!(text.contains("SOUL.md"));
        assert!(text.contains("TOOLS.md"));
        assert!(text.contains("backend-1"));
        assert!(text.contains("Refine"));
    }

    #[test]
    fn test_tail_scroll() {
        assert_eq!(WizardApp::tail_scroll("one", 5), 0);
        assert_eq!(WizardApp::tail_scroll("1\n2\n3\n4\n5", 5), 2);
    }
}
