use crate::share;
use crate::utils::*;
use chromaquest_core as game;
use clap::Args;
use game::{Instant, PickOutcome, SessionState, TickOutcome, TileIndex};
use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

/// How often the countdown is recomputed; the deadline itself is wall-clock.
const TICK_INTERVAL_MS: u32 = 250;
const MISS_FLASH_MS: u32 = 300;

type GameSession = game::Session<game::RandomRoundGenerator, LocalScoreStore>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Pick(TileIndex),
    UpdateTime,
    End,
    Reset,
    PlayAgain,
    Share,
    ClearMiss,
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    index: TileIndex,
    colour: AttrValue,
    #[prop_or_default]
    missed: bool,
    callback: Callback<TileIndex>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        index,
        colour,
        missed,
        callback,
    } = props.clone();

    let class = classes!("tile", missed.then_some("miss"));
    let style = format!("background: {colour}");
    let label = format!("Tile {}", index + 1);
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {} clicked", index);
        callback.emit(index);
    });

    html! {
        <button type="button" {class} {style} aria-label={label} {onclick}/>
    }
}

const fn status_label(state: SessionState) -> &'static str {
    use SessionState::*;
    match state {
        Idle => "Briefing",
        Running => "Mission",
        Ended => "Complete",
    }
}

/// Rank shown in the HUD: live while playing, the personal best otherwise.
fn hud_rank<G, S>(session: &game::Session<G, S>) -> game::Rank
where
    G: game::RoundGenerator,
    S: game::ScoreStore,
{
    if session.is_running() {
        session.rank()
    } else {
        session.best_rank()
    }
}

fn grid_style(size: game::GridSize) -> String {
    let gap = if size <= 3 { 14 } else { 10 };
    format!("grid-template-columns: repeat({size}, minmax(0, 1fr)); gap: {gap}px")
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Session length in seconds
    #[arg(short, long)]
    duration: Option<u32>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: GameSession,
    missed: Option<TileIndex>,
    timer: Option<Interval>,
    miss_timeout: Option<Timeout>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_INTERVAL_MS, move || link.send_message(Msg::UpdateTime))
    }

    /// Keeps exactly one interval alive while running and none otherwise.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        match (self.session.is_running(), self.timer.is_some()) {
            (true, false) => {
                log::trace!("timer started");
                self.timer = Some(Self::create_timer(ctx));
            }
            (false, true) => {
                log::trace!("timer cancelled");
                self.timer = None;
                self.missed = None;
                self.miss_timeout = None;
            }
            _ => {}
        }
    }

    fn flash_miss(&mut self, ctx: &Context<Self>, index: TileIndex) {
        let link = ctx.link().clone();
        self.missed = Some(index);
        self.miss_timeout = Some(Timeout::new(MISS_FLASH_MS, move || {
            link.send_message(Msg::ClearMiss)
        }));
    }

    fn pick(&mut self, ctx: &Context<Self>, index: TileIndex) -> bool {
        let state_before = self.session.state();

        match self.session.pick(index, Instant::now()) {
            Ok(PickOutcome::Hit) => {
                self.missed = None;
                true
            }
            Ok(PickOutcome::Miss) => {
                self.flash_miss(ctx, index);
                true
            }
            Err(err) => {
                log::debug!("pick {} ignored: {}", index, err);
                // the pick may have found the clock already expired
                self.session.state() != state_before
            }
        }
    }

    fn view_hud(&self) -> Html {
        let session = &self.session;
        let rank = hud_rank(session);

        html! {
            <aside class="hud">
                <div class="row">
                    <span class="label">{"Time"}</span>
                    <span class="clock">{format_clock(session.seconds_left())}</span>
                </div>
                <div class="stats">
                    <div><small>{"Score"}</small><strong>{session.score()}</strong></div>
                    <div><small>{"PB"}</small><strong>{session.best()}</strong></div>
                </div>
                <div class="row">
                    <span class="label">{"Rank"}</span>
                    <span>{rank.name()}</span>
                </div>
            </aside>
        }
    }

    fn view_controls(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        match self.session.state() {
            SessionState::Idle => html! {
                <button class="primary" onclick={link.callback(|_| Msg::Start)}>
                    {"START MISSION"}
                </button>
            },
            SessionState::Running => html! {
                <>
                    <button onclick={link.callback(|_| Msg::End)}>{"End"}</button>
                    <button onclick={link.callback(|_| Msg::Reset)}>{"Abort"}</button>
                </>
            },
            SessionState::Ended => html! {
                <>
                    <button class="primary" onclick={link.callback(|_| Msg::PlayAgain)}>
                        {"PLAY AGAIN"}
                    </button>
                    <button onclick={link.callback(|_| Msg::Reset)}>{"Back to Briefing"}</button>
                    <button onclick={link.callback(|_| Msg::Share)}>{"Share"}</button>
                </>
            },
        }
    }

    fn view_grid(&self, ctx: &Context<Self>) -> Html {
        let Some(round) = self.session.round() else {
            return html! {};
        };
        let size = round.size();
        let callback = ctx.link().callback(Msg::Pick);

        html! {
            <div class="grid" style={grid_style(size)}>
                {
                    for round.tiles().enumerate().map(|(i, colour)| {
                        // at most 8x8 tiles
                        let index = i as TileIndex;
                        let missed = self.missed == Some(index);
                        let colour = AttrValue::from(colour.to_string());
                        let callback = callback.clone();
                        html! {
                            <TileView key={i} {index} {colour} {missed} {callback}/>
                        }
                    })
                }
            </div>
        }
    }

    fn view_briefing(&self) -> Html {
        let seconds = self.session.config().duration_secs;

        html! {
            <section class="panels">
                <article>
                    <h2>{"How to play"}</h2>
                    <ol>
                        <li>{"Click START MISSION."}</li>
                        <li>{"Find the tile that is slightly lighter or darker."}</li>
                        <li>{"Tap it to score and advance. Wrong clicks cost nothing."}</li>
                        <li>{format!("Keep going until the {seconds} second timer hits zero.")}</li>
                    </ol>
                </article>
                <article>
                    <h2>{"Difficulty curve"}</h2>
                    <p>
                        {"The grid scales from 2×2 up to 8×8 while the brightness \
                          difference (ΔL) shrinks toward 2%."}
                    </p>
                </article>
            </section>
        }
    }

    fn view_results(&self) -> Html {
        let session = &self.session;

        html! {
            <section class="panels">
                <article>
                    <h2>{"Mission Complete"}</h2>
                    <dl>
                        <dt>{"Score"}</dt><dd>{session.score()}</dd>
                        <dt>{"Rank"}</dt><dd>{session.rank().name()}</dd>
                        <dt>{"Personal Best"}</dt><dd>{session.best()}</dd>
                    </dl>
                </article>
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let mut config = game::SessionConfig::default();
        if let Some(duration) = props.duration {
            config = config.with_duration(duration);
        }
        let generator = game::RandomRoundGenerator::new(seed, config.curve);

        Self {
            session: game::Session::new(config, generator, LocalScoreStore),
            missed: None,
            timer: None,
            miss_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Start => self.session.start(Instant::now()).is_ok(),
            Pick(index) => self.pick(ctx, index),
            UpdateTime => match self.session.tick(Instant::now()) {
                TickOutcome::TimeUp(summary) => {
                    log::info!("time up: {:?}", summary);
                    true
                }
                outcome => outcome.has_update(),
            },
            End => match self.session.end() {
                Ok(summary) => {
                    log::info!("mission ended early: {:?}", summary);
                    true
                }
                Err(err) => {
                    log::debug!("end ignored: {}", err);
                    false
                }
            },
            Reset => {
                self.session.reset();
                true
            }
            PlayAgain => self.session.play_again(Instant::now()).is_ok(),
            Share => {
                share::share(self.session.share_card().to_string());
                false
            }
            ClearMiss => {
                self.miss_timeout = None;
                self.missed.take().is_some()
            }
        };

        self.sync_timer(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let state = self.session.state();
        let difficulty = self.session.difficulty();

        html! {
            <div class="chromaquest">
                <header>
                    <div>
                        <span class="badge">{"ChromaQuest"}</span>
                        <h1>{"Find the odd one out"}</h1>
                    </div>
                    { self.view_hud() }
                </header>
                <main>
                    <nav>
                        <span class="badge">{format!("Grid {0}×{0}", difficulty.size)}</span>
                        <span class="badge">{format!("ΔL {:.1}%", difficulty.delta_l)}</span>
                        <span class="badge">{format!("Status {}", status_label(state))}</span>
                        <span class="controls">{ self.view_controls(ctx) }</span>
                    </nav>
                    {
                        match state {
                            SessionState::Idle => self.view_briefing(),
                            SessionState::Running => self.view_grid(ctx),
                            SessionState::Ended => self.view_results(),
                        }
                    }
                </main>
            </div>
        }
    }
}
