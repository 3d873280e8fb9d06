use crate::theme::Theme;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use nofox_core as game;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Empty,
    /// A tile is on its way to this cell.
    Incoming,
    /// Flipping over, the letter is not visible yet.
    Flipping,
    /// Second half of the flip, the letter just appeared.
    Revealing(game::Letter),
    Filled(game::Letter),
    Matched(game::Letter),
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Playing,
    AutoPlaying,
    Won,
    Lost,
}

fn cell_state_at(session: &game::GameSession, index: game::CellIndex) -> ViewCellState {
    use game::AnimationPhase::*;

    let cell = session.cell_at(index).unwrap_or_default();
    if let Some(pending) = session.pending().filter(|pending| pending.cell == index) {
        return match (pending.phase, cell) {
            (Flying, _) => ViewCellState::Incoming,
            (Flipping, _) | (Revealed, game::Cell::Empty) => ViewCellState::Flipping,
            (Revealed, game::Cell::Filled(letter)) => ViewCellState::Revealing(letter),
        };
    }

    match cell {
        game::Cell::Empty => ViewCellState::Empty,
        game::Cell::Filled(letter) if session.is_matched(index) => ViewCellState::Matched(letter),
        game::Cell::Filled(letter) => ViewCellState::Filled(letter),
    }
}

fn view_state(session: &game::GameSession) -> ViewGameState {
    use game::GameStatus::*;
    match session.status() {
        InProgress if session.is_auto_playing() => ViewGameState::AutoPlaying,
        InProgress => ViewGameState::Playing,
        Won => ViewGameState::Won,
        Lost => ViewGameState::Lost,
    }
}

fn status_message(session: &game::GameSession) -> Option<(&'static str, String)> {
    match view_state(session) {
        ViewGameState::Won => Some(("win-message", "Congratulations! You won!".to_string())),
        ViewGameState::Lost => {
            let word: String = session
                .config()
                .target_word
                .iter()
                .map(|letter| letter.as_char())
                .collect();
            Some(("lose-message", format!("You lose! {word} was formed!")))
        }
        ViewGameState::Playing | ViewGameState::AutoPlaying => None,
    }
}

fn format_stats(stats: game::Statistics) -> String {
    format!(
        "Games: {} | Wins: {} | Losses: {} | Win Rate: {}%",
        stats.attempts,
        stats.wins,
        stats.losses,
        stats.win_rate_percent()
    )
}

fn auto_play_label(session: &game::GameSession) -> &'static str {
    match view_state(session) {
        ViewGameState::Playing => "Automatic",
        ViewGameState::AutoPlaying => "Auto Playing...",
        ViewGameState::Won | ViewGameState::Lost => "Game Over",
    }
}

impl StorageKey for game::Statistics {
    const KEY: &'static str = "nofox:stats";

    fn is_valid(&self) -> bool {
        self.is_consistent()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    TileDropped(game::CellIndex),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum TileMsg {
    DragStart(game::TileId),
    DragEnd,
    Click(game::TileId),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    TileEvent(TileMsg),
    AutoPlay,
    SpeedUp,
    Restart,
    Tick,
    ToggleTheme,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    cell_state: ViewCellState,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        index,
        cell_state,
        callback,
    } = props.clone();

    let class = classes!(
        "grid-cell",
        match cell_state {
            Empty => classes!(),
            Incoming => classes!("incoming"),
            Flipping | Revealing(_) => classes!("tile-flipping"),
            Filled(_) => classes!("filled"),
            Matched(_) => classes!("filled", "fox-pattern"),
        }
    );
    let letter = match cell_state {
        Revealing(letter) | Filled(letter) | Matched(letter) => letter.to_string(),
        Empty | Incoming | Flipping => String::new(),
    };

    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());

    let ondrop = {
        let callback = callback.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            log::trace!("cell {} drop", index);
            callback.emit(CellMsg::TileDropped(index));
        })
    };

    let aria_label = format!("Grid cell {}", index + 1);

    html! {
        <div {class} role="button" tabindex="0" aria-label={aria_label} {ondragover} {ondrop}>
            {letter}
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    tile: game::Tile,
    #[prop_or_default]
    locked: bool,
    #[prop_or_default]
    flying: bool,
    callback: Callback<TileMsg>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        tile,
        locked,
        flying,
        callback,
    } = props.clone();

    let mut class = classes!("tile");
    if flying {
        class.push("tile-flying");
    }
    if locked {
        class.push("locked");
    }

    let ondragstart = {
        let callback = callback.clone();
        Callback::from(move |e: DragEvent| {
            if let Some(data) = e.data_transfer() {
                if let Err(err) = data.set_data("text", &tile.letter.to_string()) {
                    log::debug!("could not set drag data: {:?}", err);
                }
            }
            log::trace!("tile {:?} drag start", tile.id);
            callback.emit(TileMsg::DragStart(tile.id));
        })
    };

    let ondragend = {
        let callback = callback.clone();
        Callback::from(move |_: DragEvent| callback.emit(TileMsg::DragEnd))
    };

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            log::trace!("tile {:?} click", tile.id);
            callback.emit(TileMsg::Click(tile.id));
        })
    };

    let draggable = if locked { "false" } else { "true" };

    html! {
        <div {class} {draggable} data-letter={tile.letter.to_string()} {ondragstart} {ondragend} {onclick}>
            {tile.letter.to_string()}
        </div>
    }
}

#[derive(Args, Properties, Debug, Default, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    seed: Option<u64>,

    /// Number of rows and columns of the grid
    #[arg(long)]
    #[prop_or_default]
    size: Option<game::Coord>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::GameSession,
    theme: Theme,
    dragging: Option<game::TileId>,
    timer: Option<Timeout>,
}

impl GameView {
    fn config_from_props(props: &GameProps) -> game::GameConfig {
        let Some(size) = props.size else {
            return Default::default();
        };
        game::GameConfig::square(size).unwrap_or_else(|err| {
            log::warn!("ignoring grid size {}: {}", size, err);
            Default::default()
        })
    }

    fn new_supply(seed: u64, config: &game::GameConfig) -> game::TileSupply {
        use game::SupplyGenerator;
        game::RandomSupplyGenerator::new(seed).generate(config.total_cells())
    }

    fn apply_input(&mut self, event: game::InputEvent) -> bool {
        match self.session.handle_input(event) {
            Ok(outcome) => {
                log::debug!("{:?}: {:?}", event, outcome);
                true
            }
            Err(err) => {
                log::debug!("ignored {:?}: {}", event, err);
                false
            }
        }
    }

    fn schedule(&mut self, ctx: &Context<Self>, advance: game::Advance) {
        let Some(after) = advance.wake_after else {
            return;
        };
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        let link = ctx.link().clone();
        self.timer = Some(Timeout::new(millis, move || link.send_message(Msg::Tick)));
    }

    fn restart(&mut self) -> bool {
        let seed = js_random_seed();
        let supply = Self::new_supply(seed, self.session.config());
        match self.session.restart(supply) {
            Ok(()) => {
                log::debug!("new game, seed: {}", seed);
                self.timer = None;
                self.dragging = None;
                true
            }
            Err(err) => {
                log::debug!("restart refused: {}", err);
                false
            }
        }
    }

    fn view_tiles(&self, ctx: &Context<Self>) -> Html {
        let locked = !self.session.can_place();
        let callback = ctx.link().callback(Msg::TileEvent);
        let flying = self
            .session
            .pending()
            .filter(|pending| pending.phase == game::AnimationPhase::Flying)
            .map(|pending| pending.tile);

        html! {
            <div id="tiles-container" class="tiles">
                {
                    for flying.into_iter().map(|tile| html! {
                        <TileView key={format!("flying-{}", tile.id.0)} {tile} locked=true flying=true callback={callback.clone()}/>
                    })
                }
                {
                    for self.session.supply().iter().map(|tile| html! {
                        <TileView key={tile.id.0} {tile} {locked} callback={callback.clone()}/>
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = Self::config_from_props(props);
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);
        let supply = Self::new_supply(seed, &config);
        let stats: game::Statistics = LocalOrDefault::local_or_default();

        Self {
            session: game::GameSession::new(config, supply, stats),
            theme: Theme::init(),
            dragging: None,
            timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;
        use TileMsg::*;

        let was_finished = self.session.is_finished();

        let updated = match msg {
            CellEvent(TileDropped(cell)) => match self.dragging.take() {
                Some(tile) => self.apply_input(game::InputEvent::Drop { cell, tile }),
                None => false,
            },
            TileEvent(DragStart(tile)) => {
                self.dragging = Some(tile);
                false
            }
            TileEvent(DragEnd) => {
                self.dragging = None;
                false
            }
            TileEvent(Click(tile)) => self.apply_input(game::InputEvent::Click { tile }),
            AutoPlay => {
                let advance = self.session.start_auto_play();
                self.schedule(ctx, advance);
                !advance.is_idle()
            }
            SpeedUp => self.session.speed_up(),
            Restart => self.restart(),
            Tick => {
                self.timer = None;
                let advance = self.session.advance();
                self.schedule(ctx, advance);
                true
            }
            ToggleTheme => {
                self.theme = self.theme.toggled();
                self.theme.apply();
                true
            }
        };

        if !was_finished && self.session.is_finished() {
            log::debug!("game over: {:?}", self.session.status());
            self.session.stats().local_save();
        }

        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let session = &self.session;
        let controls = session.controls();
        let (_, cols) = session.board().size();
        let grid_style = format!("grid-template-columns: repeat({cols}, 1fr)");
        let root_style = session
            .auto_play()
            .map(|auto_play| format!("--speed: {}", auto_play.speed_multiplier()));

        let cell_callback = ctx.link().callback(Msg::CellEvent);
        let (message_class, message) = status_message(session).unzip();

        let cb_auto_play = ctx.link().callback(|_: MouseEvent| AutoPlay);
        let cb_speed_up = ctx.link().callback(|_: MouseEvent| SpeedUp);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Restart);
        let cb_theme = ctx.link().callback(|_: MouseEvent| ToggleTheme);

        html! {
            <div class="nofox" style={root_style}>
                <header>
                    <h1>{"No FOX"}</h1>
                    <button id="theme-toggle" aria-label={self.theme.toggle_label()} onclick={cb_theme}>
                        {self.theme.toggle_icon()}
                    </button>
                </header>
                <p id="stats">{format_stats(session.stats())}</p>
                <div id="grid" class="grid" style={grid_style}>
                    {
                        for (0..session.board().total_cells()).map(|index| {
                            let cell_state = cell_state_at(session, index);
                            html! {
                                <CellView key={index} {index} {cell_state} callback={cell_callback.clone()}/>
                            }
                        })
                    }
                </div>
                <p id="message" class={message_class}>{message.unwrap_or_default()}</p>
                {self.view_tiles(ctx)}
                <nav>
                    <button
                        id="auto-button"
                        disabled={!controls.contains(game::Controls::AUTO_PLAY)}
                        onclick={cb_auto_play}
                    >
                        {auto_play_label(session)}
                    </button>
                    <button
                        id="speed-up-button"
                        disabled={!controls.contains(game::Controls::SPEED_UP)}
                        onclick={cb_speed_up}
                    >
                        {"Speed up"}
                    </button>
                    <button
                        id="restart-button"
                        disabled={!controls.contains(game::Controls::RESTART)}
                        onclick={cb_restart}
                    >
                        {"Restart"}
                    </button>
                </nav>
            </div>
        }
    }
}
