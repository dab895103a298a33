//! Interactive labeler
//!
//! Shows one image at a time and records a portrait/landscape label per
//! keypress. The screen state (`LabelScreen`) is kept separate from the
//! terminal (`App`) so it can be rendered against a test backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tracing::{error, info};

use super::app::App;
use super::event::{Action, Event};
use super::layout::build_label_layout;
use super::theme::{current_theme, Theme};
use super::widgets::AssetView;
use crate::session::{AssetSource, Presentation, ReviewSession, Step};

const TICK_RATE: Duration = Duration::from_millis(100);

/// How a labeling run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    /// Every image was labeled and the file was written.
    Saved { path: PathBuf, labeled: usize },
    /// The operator quit before the end (or after a failed save).
    Quit { labeled: usize, total: usize },
}

/// What the run loop should do after handling an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(LabelOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Reviewing,
    Loading,
    SaveFailed(String),
}

/// Screen state for one labeling run.
pub struct LabelScreen {
    session: ReviewSession,
    output: PathBuf,
    current: Option<Presentation>,
    status: Status,
    theme: Theme,
}

impl LabelScreen {
    /// Wrap a session and present its first item.
    pub fn new(mut session: ReviewSession, output: PathBuf) -> Self {
        let current = session.present();
        Self {
            session,
            output,
            current,
            status: Status::Reviewing,
            theme: current_theme(),
        }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    pub fn current(&self) -> Option<&Presentation> {
        self.current.as_ref()
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Whether labeling now would need a synchronous decode of the next item.
    pub fn next_will_block(&self) -> bool {
        let next = self.session.cursor() + 1;
        next < self.session.len() && !self.session.is_cached(next)
    }

    /// Show the loading indicator until the next action completes.
    pub fn mark_loading(&mut self) {
        if self.status == Status::Reviewing {
            self.status = Status::Loading;
        }
    }

    pub fn save_failed(&self) -> bool {
        matches!(self.status, Status::SaveFailed(_))
    }

    /// Apply one action.
    pub fn handle(&mut self, action: Action) -> Flow {
        match action {
            Action::Quit => {
                info!(
                    labeled = self.session.labels().len(),
                    total = self.session.len(),
                    "labeling abandoned"
                );
                Flow::Exit(LabelOutcome::Quit {
                    labeled: self.session.labels().len(),
                    total: self.session.len(),
                })
            }
            Action::RetrySave if self.save_failed() => self.save(),
            Action::RetrySave => Flow::Continue,
            Action::Label(orientation) => {
                if self.session.is_finished() {
                    return Flow::Continue;
                }
                let step = self.session.advance(orientation);
                if self.status == Status::Loading {
                    self.status = Status::Reviewing;
                }
                match step {
                    Ok(Step::Next(presentation)) => {
                        self.current = Some(presentation);
                        Flow::Continue
                    }
                    Ok(Step::Finished) => {
                        self.current = None;
                        self.save()
                    }
                    Err(e) => {
                        error!(error = %e, "label rejected");
                        Flow::Continue
                    }
                }
            }
        }
    }

    /// Pick up background progress between keypresses.
    ///
    /// If the current item was shown as a placeholder and the loader has
    /// since published it, swap the real image in.
    pub fn tick(&mut self) {
        self.session.poll_ready();
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if current.source != AssetSource::Unavailable {
            return;
        }
        if let Some(asset) = self.session.cached_current() {
            current.asset = asset;
            current.source = AssetSource::CacheHit;
        }
    }

    fn save(&mut self) -> Flow {
        match self.session.save_labels(&self.output) {
            Ok(()) => Flow::Exit(LabelOutcome::Saved {
                path: self.output.clone(),
                labeled: self.session.labels().len(),
            }),
            Err(e) => {
                error!(path = %self.output.display(), error = %e, "failed to save labels");
                self.status = Status::SaveFailed(e.to_string());
                Flow::Continue
            }
        }
    }

    /// Draw the whole screen.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(self.theme.text_style()), area);

        let [header, image, status, footer] = build_label_layout(area);
        self.render_header(frame, header);
        self.render_image(frame, image);
        self.render_status(frame, status);
        self.render_footer(frame, footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" orilabel ", self.theme.accent_bold_style())];
        if !self.session.is_finished() {
            spans.push(Span::styled(
                format!(" {} ", self.session.progress()),
                self.theme.text_secondary_style(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_image(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().style(self.theme.panel_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.current {
            Some(presentation) => frame.render_widget(
                AssetView::new(&presentation.asset).backdrop(self.theme.panel),
                inner,
            ),
            None => {
                let text = if self.session.is_empty() {
                    "No images found"
                } else {
                    "All images labeled"
                };
                let y = inner.y + inner.height / 2;
                frame.render_widget(
                    Paragraph::new(text)
                        .alignment(Alignment::Center)
                        .style(self.theme.panel_style()),
                    Rect::new(inner.x, y, inner.width, inner.height.min(1)),
                );
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match (&self.status, &self.current) {
            (Status::SaveFailed(message), _) => Line::from(Span::styled(
                format!(" Could not save labels: {} ", message),
                self.theme.error_style(),
            )),
            (Status::Loading, _) => {
                Line::from(Span::styled(" Loading... ", self.theme.accent_style()))
            }
            (Status::Reviewing, Some(p)) => {
                let mut spans = vec![Span::styled(format!(" {} ", p.name), self.theme.accent_style())];
                let (w, h) = p.asset.source_dimensions();
                if p.source == AssetSource::Unavailable {
                    spans.push(Span::styled("(unavailable)", self.theme.error_style()));
                } else if w > 0 && h > 0 {
                    spans.push(Span::styled(
                        format!("{}x{}", w, h),
                        self.theme.text_secondary_style(),
                    ));
                }
                Line::from(spans)
            }
            (Status::Reviewing, None) => Line::default(),
        };
        frame.render_widget(Paragraph::new(line).style(self.theme.text_style()), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.save_failed() {
            " s: retry save  q: quit "
        } else {
            " p: portrait  l: landscape  q: quit "
        };
        frame.render_widget(
            Paragraph::new(hints).style(self.theme.text_secondary_style()),
            area,
        );
    }
}

/// Run the labeler on the current terminal until the operator finishes or quits.
#[cfg(not(tarpaulin_include))]
pub fn run(session: ReviewSession, output: PathBuf) -> Result<LabelOutcome> {
    let mut screen = LabelScreen::new(session, output);
    let mut app = App::new(TICK_RATE)?;

    loop {
        app.draw(|frame| screen.render(frame))?;

        let action = match app.next_event()? {
            Event::Key(key) => Action::from_key(&key),
            Event::Tick => {
                screen.tick();
                None
            }
            Event::Resize(_, _) => None,
        };
        let Some(action) = action else {
            continue;
        };

        if matches!(action, Action::Label(_)) && screen.next_will_block() {
            screen.mark_loading();
            app.draw(|frame| screen.render(frame))?;
        }

        if let Flow::Exit(outcome) = screen.handle(action) {
            return Ok(outcome);
        }
    }
}
