#![forbid(unsafe_code)]

//! The host-driven app shell.
//!
//! [`AppShell`] owns every piece of client state that changes over time:
//! the screen flow, the onboarding carousel, the auth forms, and the one
//! [`TimerQueue`] all of them share. The host (a native view layer, a
//! WebView bridge, a test) calls [`AppShell::advance`] once per frame and
//! forwards user gestures; it reads the screen and drains notices and slide
//! events after each call.
//!
//! # Invariants
//!
//! 1. Timers belonging to a screen are cancelled when that screen is left.
//!    Nothing fires into a screen that is not showing.
//! 2. A slide controller exists only while the onboarding screen shows.
//! 3. Forms start empty each time their screen is entered.
//! 4. Gestures for a screen other than the current one are ignored.

use std::time::Duration;

use smartbudget_core::animation::Animation;
use smartbudget_core::animation::decor::{CardTilt, Floating, Transform};
use smartbudget_core::{Scheduler, TimerId, TimerQueue};
use smartbudget_onboarding::{DEFAULT_DECK, Dot, Pager, Slide, SlideController, SlideEvent};

use crate::auth::AuthAttempt;
use crate::config::AppConfig;
use crate::flow::{FlowMsg, Screen, ScreenFlow};
use crate::forms::{AuthKind, FormError, Notice, SignInForm, SignUpForm, social_notice};

/// Floating logo badge for `screen`: bob height in points and leg duration.
fn badge_for(screen: Screen) -> Floating {
    match screen {
        Screen::Onboarding | Screen::Main => Floating::new(8.0, Duration::from_millis(4000)),
        Screen::SignIn => Floating::new(12.0, Duration::from_millis(3000)),
        Screen::SignUp => Floating::new(12.0, Duration::from_millis(3500)),
        Screen::Loading => Floating::default(),
    }
}

#[derive(Debug)]
pub struct AppShell {
    config: AppConfig,
    timers: TimerQueue,
    flow: ScreenFlow,
    session_check: Option<TimerId>,
    pager: Pager,
    onboarding: Option<SlideController>,
    slide_events: Vec<SlideEvent>,
    sign_in: SignInForm,
    sign_up: SignUpForm,
    sign_in_auth: AuthAttempt,
    sign_up_auth: AuthAttempt,
    notices: Vec<Notice>,
    logo: Floating,
    card: CardTilt,
}

impl AppShell {
    /// A shell for a window `page_width` points wide.
    #[must_use]
    pub fn new(config: AppConfig, page_width: f32) -> Self {
        Self {
            sign_in_auth: AuthAttempt::new(AuthKind::SignIn, config.sign_in_delay),
            sign_up_auth: AuthAttempt::new(AuthKind::SignUp, config.sign_up_delay),
            config,
            timers: TimerQueue::new(),
            flow: ScreenFlow::new(),
            session_check: None,
            pager: Pager::new(page_width),
            onboarding: None,
            slide_events: Vec::new(),
            sign_in: SignInForm::default(),
            sign_up: SignUpForm::default(),
            notices: Vec::new(),
            logo: Floating::default(),
            card: CardTilt::interactive(),
        }
    }

    // ── Observation ──────────────────────────────────────────────────────

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.flow.screen()
    }

    /// Shell time: total of every `advance`.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    /// The slide showing, while onboarding.
    #[must_use]
    pub fn current_slide(&self) -> Option<&'static Slide> {
        let slides = self.onboarding.as_ref()?;
        DEFAULT_DECK.get(slides.current_index())
    }

    /// Pagination dots, while onboarding.
    #[must_use]
    pub fn dots(&self) -> Vec<Dot> {
        self.onboarding
            .as_ref()
            .map(|s| Pager::dots(s.current_index(), s.slide_count()))
            .unwrap_or_default()
    }

    /// Whether the "Get Started" button shows.
    #[must_use]
    pub fn shows_get_started(&self) -> bool {
        self.onboarding
            .as_ref()
            .is_some_and(|s| Slide::shows_get_started(s.current_index(), s.slide_count()))
    }

    /// Scroll offset the carousel should show.
    #[must_use]
    pub fn carousel_offset(&self) -> Option<f32> {
        let slides = self.onboarding.as_ref()?;
        Some(self.pager.offset_for(slides.current_index()))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        match self.screen() {
            Screen::Loading => true,
            Screen::SignIn => self.sign_in_auth.is_loading(),
            Screen::SignUp => self.sign_up_auth.is_loading(),
            Screen::Onboarding | Screen::Main => false,
        }
    }

    /// Alerts raised since the last call, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Carousel page changes since the last call, for the host to scroll to.
    pub fn drain_slide_events(&mut self) -> Vec<SlideEvent> {
        std::mem::take(&mut self.slide_events)
    }

    #[must_use]
    pub fn logo_transform(&self) -> Transform {
        self.logo.transform()
    }

    #[must_use]
    pub fn card_transform(&self) -> Transform {
        self.card.transform()
    }

    // ── Time ─────────────────────────────────────────────────────────────

    /// Start the session check. Only meaningful once, on the loading screen.
    pub fn boot(&mut self) {
        if self.screen() != Screen::Loading || self.session_check.is_some() {
            return;
        }
        self.session_check = Some(self.timers.schedule(self.config.session_check_delay));
        tracing::debug!("checking for a stored session");
    }

    /// Move time forward by `dt`, firing every timer that falls due.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.timers.now().saturating_add(dt);
        while let Some(fired) = self.timers.pop_due(until) {
            self.on_timer(fired.id);
        }
        self.timers.advance_to(until, |_, _| {});
        self.logo.tick(dt);
        self.card.tick(dt);
    }

    fn on_timer(&mut self, id: TimerId) {
        if self.session_check == Some(id) {
            self.session_check = None;
            // No persistence: every launch starts with onboarding.
            self.go(FlowMsg::SessionChecked);
            return;
        }
        if let Some(slides) = self.onboarding.as_mut() {
            if slides.on_timer_fire(id, &mut self.timers) {
                self.pump_slides();
                return;
            }
        }
        if let Some(notice) = self.sign_in_auth.on_timer_fire(id) {
            self.notices.push(notice);
            self.go(FlowMsg::SignInSucceeded);
        } else if let Some(notice) = self.sign_up_auth.on_timer_fire(id) {
            self.notices.push(notice);
            self.go(FlowMsg::SignUpSucceeded);
        }
    }

    // ── Onboarding gestures ──────────────────────────────────────────────

    /// The carousel settled at `offset_x`.
    pub fn swipe(&mut self, offset_x: f32) {
        if let Some(slides) = self.onboarding.as_mut() {
            slides.on_scroll(offset_x, &self.pager, &mut self.timers);
            self.pump_slides();
        }
    }

    pub fn tap_dot(&mut self, index: usize) {
        if let Some(slides) = self.onboarding.as_mut() {
            let target = i64::try_from(index).unwrap_or(i64::MAX);
            slides.on_manual_navigate(target, &mut self.timers);
            self.pump_slides();
        }
    }

    pub fn skip_onboarding(&mut self) {
        if let Some(slides) = self.onboarding.as_mut() {
            slides.skip(&mut self.timers);
            self.pump_slides();
        }
    }

    /// "Get Started". Only present on the last slide.
    pub fn get_started(&mut self) {
        if !self.shows_get_started() {
            tracing::debug!("get started pressed off the last slide; ignored");
            return;
        }
        if let Some(slides) = self.onboarding.as_mut() {
            slides.complete(&mut self.timers);
            self.pump_slides();
        }
    }

    fn pump_slides(&mut self) {
        let Some(slides) = self.onboarding.as_mut() else {
            return;
        };
        let mut completed = false;
        for event in slides.drain_events() {
            match event {
                SlideEvent::Completed => completed = true,
                SlideEvent::IndexChanged(_) => self.slide_events.push(event),
            }
        }
        if completed {
            self.slide_events.push(SlideEvent::Completed);
            self.go(FlowMsg::OnboardingComplete);
        }
    }

    // ── Auth screens ─────────────────────────────────────────────────────

    pub fn sign_in_form(&self) -> &SignInForm {
        &self.sign_in
    }

    pub fn sign_in_form_mut(&mut self) -> &mut SignInForm {
        &mut self.sign_in
    }

    pub fn sign_up_form(&self) -> &SignUpForm {
        &self.sign_up
    }

    pub fn sign_up_form_mut(&mut self) -> &mut SignUpForm {
        &mut self.sign_up
    }

    /// Validate and submit the sign-in form. On a validation error the
    /// alert is queued as well as returned.
    pub fn submit_sign_in(&mut self) -> Result<(), FormError> {
        if self.screen() != Screen::SignIn {
            return Ok(());
        }
        if let Err(err) = self.sign_in.validate() {
            self.notices.push(err.notice());
            return Err(err);
        }
        self.sign_in_auth.begin(&mut self.timers);
        Ok(())
    }

    /// Validate and submit the sign-up form.
    pub fn submit_sign_up(&mut self) -> Result<(), FormError> {
        if self.screen() != Screen::SignUp {
            return Ok(());
        }
        if let Err(err) = self.sign_up.validate() {
            self.notices.push(err.notice());
            return Err(err);
        }
        self.sign_up_auth.begin(&mut self.timers);
        Ok(())
    }

    /// A social provider button was pressed.
    pub fn social_auth(&mut self, provider: &str) {
        let kind = match self.screen() {
            Screen::SignIn => AuthKind::SignIn,
            Screen::SignUp => AuthKind::SignUp,
            _ => return,
        };
        tracing::debug!(provider, kind = kind.verb(), "social auth requested");
        self.notices.push(social_notice(provider, kind));
    }

    pub fn go_to_sign_up(&mut self) {
        self.go(FlowMsg::GoToSignUp);
    }

    pub fn go_to_sign_in(&mut self) {
        self.go(FlowMsg::GoToSignIn);
    }

    pub fn logout(&mut self) {
        self.go(FlowMsg::Logout);
    }

    // ── Main screen card ─────────────────────────────────────────────────

    pub fn pan_card(&mut self, translation_x: f32) {
        if self.screen() == Screen::Main {
            self.card.on_pan(translation_x);
        }
    }

    pub fn release_card(&mut self) {
        self.card.on_release();
    }

    // ── Transitions ──────────────────────────────────────────────────────

    fn go(&mut self, msg: FlowMsg) -> bool {
        let from = self.screen();
        match self.flow.update(msg) {
            Ok(to) => {
                self.leave(from);
                self.enter(to);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "screen transition rejected");
                false
            }
        }
    }

    fn leave(&mut self, screen: Screen) {
        match screen {
            Screen::Loading => {
                if let Some(id) = self.session_check.take() {
                    self.timers.cancel(id);
                }
            }
            Screen::Onboarding => {
                if let Some(mut slides) = self.onboarding.take() {
                    slides.dispose(&mut self.timers);
                }
                self.card = CardTilt::interactive();
            }
            Screen::SignIn => self.sign_in_auth.cancel(&mut self.timers),
            Screen::SignUp => self.sign_up_auth.cancel(&mut self.timers),
            Screen::Main => self.card.reset(),
        }
    }

    fn enter(&mut self, screen: Screen) {
        self.logo = badge_for(screen);
        match screen {
            Screen::Loading => {}
            Screen::Onboarding => {
                // The welcome card sways on its own while slides play.
                self.card = CardTilt::swaying();
                self.start_onboarding();
            }
            Screen::SignIn => self.sign_in = SignInForm::default(),
            Screen::SignUp => self.sign_up = SignUpForm::default(),
            Screen::Main => self.card = CardTilt::interactive(),
        }
    }

    fn start_onboarding(&mut self) {
        match SlideController::with_config(DEFAULT_DECK.len(), &self.config.onboarding) {
            Ok(mut slides) => {
                slides.start(&mut self.timers);
                self.onboarding = Some(slides);
            }
            Err(err) => {
                // Only reachable with a zero delay; skip straight past.
                tracing::warn!(error = %err, "onboarding unavailable");
                self.go(FlowMsg::OnboardingComplete);
            }
        }
    }
}
