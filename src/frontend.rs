use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::{Function, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Element, HtmlInputElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use portfolio::config::RuntimeConfig;
use portfolio::content::{Project, SiteContent};
use portfolio::geometry::{pointer_to_ndc, Camera, Vec3};
use portfolio::logging::{LogLevel, Logger};
use portfolio::mesh::WireMesh;
use portfolio::motion::AnimationClock;
use portfolio::particles::{ParticleField, ParticleStyle};
use portfolio::scene::{self, Interaction, Material, ModelKind, ShapeKind, Transform};
use portfolio::shell::{ShellAction, ShellState, Theme};
use portfolio::social::{
    DockSide, FlipRequest, LayoutMode, OverlayEvent, SocialOverlay, TransitionRequest,
};
use portfolio::terminal::{Command, LineKind, TerminalSession, TerminalSignal};

const PAGE_CAMERA_Z: f64 = 5.0;
const OVERLAY_CAMERA_Z: f64 = 8.0;
const CAMERA_FOV: f64 = 75.0;
const AVATAR_RADIUS: f64 = 0.7;
const LABEL_ANCHOR: Vec3 = Vec3::new(0.0, -2.0, 0.0);
const CODE_PARTICLE_FACTOR: usize = 4;

fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || {
        apply_theme(theme);
    });

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn open_in_new_context(href: &str) {
    if let Some(win) = window() {
        let _ = win.open_with_url_and_target(href, "_blank");
    }
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "mail" => "✉",
        "linkedin" => "in",
        "twitter" => "𝕏",
        "github" => "⌥",
        "instagram" => "◎",
        "discord" => "☊",
        "layers" => "≡",
        "code" => "</>",
        "terminal" => ">_",
        "sparkles" => "✦",
        "smartphone" => "▯",
        "box" => "▣",
        "zap" => "ϟ",
        "shield" => "⛨",
        "cloud" => "☁",
        _ => "•",
    }
}

fn num(value: f64) -> String {
    format!("{value:.3}")
}

/// Host timestamp of the latest animation frame. Re-renders the calling
/// component once per display refresh until it unmounts.
#[hook]
fn use_frame_time() -> f64 {
    let now = use_state(performance_now);
    {
        let now = now.clone();
        use_effect_with((), move |_| {
            let slot = Rc::new(RefCell::new(None));
            schedule_frame(Rc::clone(&slot), now);
            move || {
                slot.borrow_mut().take();
            }
        });
    }
    *now
}

fn schedule_frame(slot: Rc<RefCell<Option<AnimationFrame>>>, now: UseStateHandle<f64>) {
    let next = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        next.borrow_mut().take();
        now.set(timestamp);
        schedule_frame(next, now);
    });
    *slot.borrow_mut() = Some(handle);
}

#[hook]
fn use_elapsed_seconds() -> f64 {
    let now = use_frame_time();
    let clock = use_mut_ref(AnimationClock::new);
    let elapsed = clock.borrow_mut().sample(now);
    elapsed
}

#[hook]
fn use_viewport() -> (f64, f64) {
    let size = use_state(viewport_size);
    {
        let size = size.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "resize", move |_| size.set(viewport_size()))
            });
            move || drop(listener)
        });
    }
    *size
}

/// Perspective projection into an SVG `viewBox` whose height spans -1..1.
struct Projector {
    camera: Camera,
}

impl Projector {
    fn new(camera_z: f64, aspect: f64) -> Self {
        Self {
            camera: Camera::new(Vec3::new(0.0, 0.0, camera_z), CAMERA_FOV, aspect),
        }
    }

    fn for_viewport(camera_z: f64, (width, height): (f64, f64)) -> Self {
        Self::new(camera_z, width / height.max(1.0))
    }

    fn view_box(&self) -> String {
        let aspect = self.camera.aspect;
        format!("{} -1 {} 2", num(-aspect), num(2.0 * aspect))
    }

    fn point(&self, world: Vec3) -> Option<(f64, f64)> {
        self.camera
            .project(world)
            .map(|(x, y)| (x * self.camera.aspect, -y))
    }

    fn radius(&self, world: Vec3, radius: f64) -> f64 {
        radius * self.camera.perspective_scale(world)
    }

    fn wire_path(&self, segments: &[(Vec3, Vec3)]) -> String {
        let mut path = String::new();
        for (a, b) in segments {
            if let (Some((ax, ay)), Some((bx, by))) = (self.point(*a), self.point(*b)) {
                let _ = write!(path, "M{ax:.3} {ay:.3}L{bx:.3} {by:.3}");
            }
        }
        path
    }

    fn wire(&self, mesh: &WireMesh, transform: &Transform, material: &Material<'_>) -> Html {
        let width = 0.004 * (1.0 + material.emissive_intensity);
        html! {
            <path
                class="wire"
                d={self.wire_path(&mesh.segments(transform))}
                stroke={material.color.to_string()}
                stroke-opacity={num(material.opacity)}
                stroke-width={num(width)}
            />
        }
    }

    fn dot(&self, world: Vec3, radius: f64, fill: String, opacity: f64) -> Html {
        let Some((x, y)) = self.point(world) else {
            return Html::default();
        };
        html! {
            <circle
                cx={num(x)}
                cy={num(y)}
                r={num(self.radius(world, radius))}
                fill={fill}
                fill-opacity={num(opacity)}
            />
        }
    }

    fn particles(&self, field: &ParticleField, elapsed: f64, dark: bool) -> Html {
        let angle = field.rotation_y(elapsed);
        let size = field.style().point_size() / 2.0;
        let dots = field
            .positions_at(elapsed)
            .into_iter()
            .zip(field.colors())
            .map(|(local, color)| self.dot(local.rotate_y(angle), size, color.to_css(), 1.0));

        html! {
            <g class="particles" opacity={num(field.style().opacity(dark))}>
                { for dots }
            </g>
        }
    }
}

#[derive(Clone, PartialEq)]
struct ShellStore(ShellState);

impl Reducible for ShellStore {
    type Action = ShellAction;

    fn reduce(self: Rc<Self>, action: ShellAction) -> Rc<Self> {
        Rc::new(Self(self.0.apply(action)))
    }
}

#[derive(Properties, PartialEq)]
struct ParticleBackdropProps {
    kind: ParticleStyle,
    count: usize,
    seed: u64,
    dark: bool,
    #[prop_or_default]
    class: Classes,
}

#[function_component(ParticleBackdrop)]
fn particle_backdrop(props: &ParticleBackdropProps) -> Html {
    let elapsed = use_elapsed_seconds();
    let viewport = use_viewport();
    let field = use_memo((props.kind, props.count, props.seed), |(kind, count, seed)| {
        ParticleField::generate(*kind, *count, *seed)
    });
    let projector = Projector::for_viewport(PAGE_CAMERA_Z, viewport);

    html! {
        <svg class={classes!("scene-canvas", props.class.clone())} viewBox={projector.view_box()} aria-hidden="true">
            { projector.particles(&field, elapsed, props.dark) }
        </svg>
    }
}

#[derive(Properties, PartialEq)]
struct DarkProps {
    dark: bool,
}

#[function_component(HeroScene)]
fn hero_scene(props: &DarkProps) -> Html {
    let elapsed = use_elapsed_seconds();
    let projector = Projector::new(PAGE_CAMERA_Z, 16.0 / 9.0);
    let octahedron = use_memo((), |_| WireMesh::octahedron(0.5));
    let ring = use_memo((), |_| WireMesh::ring(1.0, 48));

    let shapes = scene::HERO_SHAPES.iter().enumerate().map(|(index, shape)| {
        projector.wire(&octahedron, &shape.transform(elapsed, index), &shape.material(props.dark))
    });

    let hologram_spin = scene::hologram_rotation(elapsed);
    let rings = scene::HOLOGRAM_RINGS.iter().map(|ring_params| {
        let mut transform = ring_params.transform(elapsed);
        transform.scale = ring_params.radius;
        transform.rotation.y = hologram_spin;
        projector.wire(&ring, &transform, &ring_params.material())
    });

    let nodes = (0..scene::DATA_NODE_COUNT).map(|index| {
        let (transform, material) = scene::data_node(index, elapsed);
        let world = transform.position.rotate_y(hologram_spin);
        projector.dot(world, 0.1, material.color.to_string(), material.opacity)
    });

    html! {
        <svg class="scene-canvas hero-canvas" viewBox={projector.view_box()} aria-hidden="true">
            { for shapes }
            { for rings }
            { for nodes }
        </svg>
    }
}

#[derive(Properties, PartialEq)]
struct TechOrbitProps {
    content: Rc<SiteContent>,
}

#[function_component(TechOrbit)]
fn tech_orbit(props: &TechOrbitProps) -> Html {
    let elapsed = use_elapsed_seconds();
    let projector = Projector::new(OVERLAY_CAMERA_Z, 2.0);
    let core = use_memo((), |_| WireMesh::icosahedron(0.8));
    let orb = use_memo((), |_| WireMesh::octahedron(0.2));

    let core_transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::new(0.0, scene::tech_orbit_core_rotation(elapsed), 0.0),
        scale: 1.0,
    };
    let core_material = scene::orbiting_skill_material(1);

    let orbs = (0..scene::SKILL_ORB_COUNT).map(|index| {
        let material = scene::orbiting_skill_material(index);
        projector.wire(&orb, &scene::skill_orb(index, elapsed), &material)
    });

    let badges = props
        .content
        .skills
        .iter()
        .take(scene::TECH_ORBIT_SLOTS)
        .enumerate()
        .filter_map(|(index, skill)| {
            let transform = scene::orbiting_skill(index, elapsed);
            let (x, y) = projector.point(transform.position)?;
            let material = scene::orbiting_skill_material(index);
            let size = projector.radius(transform.position, 0.3);
            Some(html! {
                <text
                    class="orbit-label"
                    x={num(x)}
                    y={num(y)}
                    font-size={num(size)}
                    fill={material.color.to_string()}
                    text-anchor="middle"
                >
                    { skill.name.clone() }
                </text>
            })
        });

    html! {
        <svg class="scene-canvas orbit-canvas" viewBox={projector.view_box()} aria-hidden="true">
            { projector.wire(&core, &core_transform, &core_material) }
            { for orbs }
            { for badges }
        </svg>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectShapeProps {
    index: usize,
    color: AttrValue,
    hovered: bool,
}

#[function_component(ProjectShape)]
fn project_shape(props: &ProjectShapeProps) -> Html {
    let elapsed = use_elapsed_seconds();
    let projector = Projector::new(3.0, 1.6);
    let mesh = use_memo(props.index, |index| {
        WireMesh::for_project(ShapeKind::for_project(*index))
    });
    let interaction = Interaction {
        hovered: props.hovered,
        pressed_at: None,
    };
    let transform = scene::project_shape(props.index, elapsed, interaction);
    let material = scene::project_shape_material(props.color.as_str(), interaction);

    html! {
        <svg class="scene-canvas project-canvas" viewBox={projector.view_box()} aria-hidden="true">
            { projector.wire(&mesh, &transform, &material) }
        </svg>
    }
}

#[function_component(ProjectCubes)]
fn project_cubes() -> Html {
    let elapsed = use_elapsed_seconds();
    let projector = Projector::new(PAGE_CAMERA_Z, 3.0);
    let cube = use_memo((), |_| WireMesh::cuboid(1.5, 1.5, 1.5));

    let cubes = scene::ACCENT_PALETTE.iter().take(3).enumerate().map(|(index, color)| {
        let material = Material {
            color: *color,
            opacity: 0.35,
            emissive_intensity: 0.2,
            wireframe: true,
        };
        projector.wire(&cube, &scene::project_cube(index, elapsed), &material)
    });

    html! {
        <svg class="scene-canvas cubes-canvas" viewBox={projector.view_box()} aria-hidden="true">
            { for cubes }
        </svg>
    }
}

#[derive(Properties, PartialEq)]
struct ModelViewProps {
    kind: ModelKind,
    label: AttrValue,
}

#[function_component(ModelView)]
fn model_view(props: &ModelViewProps) -> Html {
    let elapsed = use_elapsed_seconds();
    let hovered = use_state(|| false);
    let pressed_at = use_state(|| None::<f64>);
    let projector = Projector::new(PAGE_CAMERA_Z, 1.0);
    let mesh = use_memo(props.kind, |kind| WireMesh::for_model(*kind));

    let interaction = Interaction {
        hovered: *hovered,
        pressed_at: *pressed_at,
    };
    let mut transform = scene::interactive_model(props.kind, elapsed, interaction);
    transform.scale *= 1.6;
    let material = Material {
        color: "#4195f6",
        opacity: 0.8,
        emissive_intensity: if *hovered { 0.6 } else { 0.2 },
        wireframe: true,
    };

    let leds = (props.kind == ModelKind::Server).then(|| {
        (0..3)
            .map(|unit| {
                let local = Vec3::new(0.4, unit as f64 * 0.4, 0.41);
                let world = transform.apply(local);
                projector.dot(world, 0.05, "#ef4444".to_string(), scene::server_led_intensity(unit, elapsed) * 2.0)
            })
            .collect::<Html>()
    });

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        let pressed_at = pressed_at.clone();
        Callback::from(move |_: MouseEvent| {
            hovered.set(false);
            pressed_at.set(None);
        })
    };
    let onmousedown = {
        let pressed_at = pressed_at.clone();
        Callback::from(move |_: MouseEvent| pressed_at.set(Some(elapsed)))
    };
    let onmouseup = {
        let pressed_at = pressed_at.clone();
        Callback::from(move |_: MouseEvent| pressed_at.set(None))
    };

    html! {
        <figure class="model-card" {onmouseenter} {onmouseleave} {onmousedown} {onmouseup}>
            <svg class="scene-canvas model-canvas" viewBox={projector.view_box()} aria-hidden="true">
                { projector.wire(&mesh, &transform, &material) }
                { leds.unwrap_or_default() }
            </svg>
            <figcaption>
                <span class="model-label">{ props.label.clone() }</span>
                if *hovered {
                    <span class="model-hint">{ props.kind.hover_hint() }</span>
                }
            </figcaption>
        </figure>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    index: usize,
    project: Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let hovered = use_state(|| false);
    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let project = &props.project;

    html! {
        <article class="project-card glass" {onmouseenter} {onmouseleave}>
            <ProjectShape
                index={props.index}
                color={AttrValue::from(project.color.clone())}
                hovered={*hovered}
            />
            <div class="project-copy">
                <p class="project-category">{ project.category.clone() }</p>
                <h3>{ project.name.clone() }</h3>
                <p class="muted">{ project.description.clone() }</p>
            </div>
            <a class="project-link" href={project.link.clone()} target="_blank" rel="noopener noreferrer">
                {"View Project"}
                <span class="external-mark" aria-hidden="true">{"↗"}</span>
                <span class="sr-only">{" (opens in a new tab)"}</span>
            </a>
        </article>
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TerminalAction {
    Submit(f64),
    Tick(f64),
    Previous,
    Next,
}

#[derive(Clone, PartialEq)]
struct TerminalStore {
    session: TerminalSession,
    exited: bool,
}

enum TerminalMessage {
    Input(String),
    Action(TerminalAction),
}

impl Reducible for TerminalStore {
    type Action = TerminalMessage;

    fn reduce(self: Rc<Self>, message: TerminalMessage) -> Rc<Self> {
        let mut next = (*self).clone();
        match message {
            TerminalMessage::Input(value) => next.session.set_input(value),
            TerminalMessage::Action(TerminalAction::Submit(now)) => {
                next.session.submit_input(now);
            }
            TerminalMessage::Action(TerminalAction::Tick(now)) => {
                if next.session.tick(now) == Some(TerminalSignal::Exit) {
                    next.exited = true;
                }
            }
            TerminalMessage::Action(TerminalAction::Previous) => next.session.history_previous(),
            TerminalMessage::Action(TerminalAction::Next) => next.session.history_next(),
        }
        Rc::new(next)
    }
}

fn line_class(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Banner => "line-banner",
        LineKind::Prompt => "line-prompt",
        LineKind::Output => "line-output",
        LineKind::NotFound => "line-error",
        LineKind::System => "line-system",
    }
}

#[derive(Properties, PartialEq)]
struct TerminalBackdropProps {
    count: usize,
    seed: u64,
}

#[function_component(TerminalBackdrop)]
fn terminal_backdrop(props: &TerminalBackdropProps) -> Html {
    let elapsed = use_elapsed_seconds();
    let viewport = use_viewport();
    let projector = Projector::for_viewport(PAGE_CAMERA_Z, viewport);
    let field = use_memo((props.count, props.seed), |(count, seed)| {
        ParticleField::generate(ParticleStyle::MatrixRain, *count, *seed)
    });
    let cube = use_memo((), |_| WireMesh::cuboid(2.0, 2.0, 2.0));
    let material = Material {
        color: "#00ff00",
        opacity: 0.15,
        emissive_intensity: 0.0,
        wireframe: true,
    };

    let cubes = (0..scene::TERMINAL_CUBES.len())
        .map(|index| projector.wire(&cube, &scene::terminal_cube(index, elapsed), &material));

    html! {
        <svg class="scene-canvas terminal-canvas" viewBox={projector.view_box()} aria-hidden="true">
            { projector.particles(&field, elapsed, true) }
            { for cubes }
        </svg>
    }
}

#[derive(Properties, PartialEq)]
struct TerminalViewProps {
    content: Rc<SiteContent>,
    config: Rc<RuntimeConfig>,
    logger: Logger,
    on_leave: Callback<&'static str>,
}

#[function_component(TerminalView)]
fn terminal_view(props: &TerminalViewProps) -> Html {
    let terminal = props.content.terminal.clone();
    let config = Rc::clone(&props.config);
    let store = use_reducer(move || TerminalStore {
        session: TerminalSession::new(terminal, &config),
        exited: false,
    });
    let input_ref = use_node_ref();
    let body_ref = use_node_ref();
    let session = &store.session;

    {
        let store = store.clone();
        use_effect_with(session.next_deadline(), move |deadline| {
            let timeout = deadline.map(|due| {
                let wait = (due - performance_now()).max(0.0).ceil() as u32;
                Timeout::new(wait, move || {
                    let now = performance_now().max(due);
                    store.dispatch(TerminalMessage::Action(TerminalAction::Tick(now)));
                })
            });
            move || drop(timeout)
        });
    }

    {
        let on_leave = props.on_leave.clone();
        use_effect_with(store.exited, move |exited| {
            if *exited {
                on_leave.emit("exit");
            }
            || ()
        });
    }

    {
        let input_ref = input_ref.clone();
        use_effect_with(session.is_busy(), move |busy| {
            if !*busy {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    {
        let body_ref = body_ref.clone();
        use_effect_with(session.output_log().len(), move |_| {
            if let Some(body) = body_ref.cast::<Element>() {
                body.set_scroll_top(body.scroll_height());
            }
            || ()
        });
    }

    let oninput = {
        let store = store.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            store.dispatch(TerminalMessage::Input(input.value()));
        })
    };

    let onkeydown = {
        let store = store.clone();
        let logger = props.logger;
        Callback::from(move |event: KeyboardEvent| {
            let action = match event.key().as_str() {
                "Enter" => {
                    if let Some(command) = Command::parse(store.session.pending_input()) {
                        logger.info(
                            "terminal_command",
                            json!({
                                "command": command.as_str(),
                                "busy": store.session.is_busy(),
                            }),
                        );
                    }
                    TerminalAction::Submit(performance_now())
                }
                "ArrowUp" => TerminalAction::Previous,
                "ArrowDown" => TerminalAction::Next,
                _ => return,
            };
            event.prevent_default();
            store.dispatch(TerminalMessage::Action(action));
        })
    };

    let on_exit_click = {
        let on_leave = props.on_leave.clone();
        Callback::from(move |_: MouseEvent| on_leave.emit("button"))
    };

    let focus_input = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        })
    };

    let lines = session.output_log().iter().map(|line| {
        let text = if line.text.is_empty() {
            "\u{a0}".to_string()
        } else {
            line.text.clone()
        };
        html! { <div class={classes!("terminal-line", line_class(line.kind))}>{ text }</div> }
    });

    html! {
        <div class="terminal-mode">
            <TerminalBackdrop count={props.config.particle_count} seed={props.config.particle_seed} />
            <div class="terminal-frame">
                <div class="terminal-bar glass">
                    <div class="terminal-dots" aria-hidden="true">
                        <span class="dot dot-red"></span>
                        <span class="dot dot-yellow"></span>
                        <span class="dot dot-green"></span>
                    </div>
                    <span class="terminal-title">{"Noctyx Terminal"}</span>
                    <button class="terminal-exit" type="button" onclick={on_exit_click}>{"Exit"}</button>
                </div>
                <div class="terminal-body" ref={body_ref} onclick={focus_input}>
                    { for lines }
                    <label class="terminal-input-row">
                        <span class="terminal-prompt">{ session.prompt().to_string() }</span>
                        <input
                            ref={input_ref}
                            class="terminal-input"
                            type="text"
                            autocomplete="off"
                            spellcheck="false"
                            aria-label="Terminal command"
                            value={session.pending_input().to_string()}
                            disabled={session.is_busy()}
                            {oninput}
                            {onkeydown}
                        />
                    </label>
                </div>
            </div>
        </div>
    }
}

fn log_overlay_event(logger: &Logger, event: OverlayEvent) {
    match event {
        OverlayEvent::LegCompleted(mode) => {
            logger.debug("overlay_transition_leg", json!({ "mode": mode.as_str() }));
        }
        OverlayEvent::TransitionCompleted(mode) => {
            logger.info("overlay_transition_completed", json!({ "mode": mode.as_str() }));
        }
        OverlayEvent::FlipCompleted => logger.debug("overlay_flip", json!({ "phase": "completed" })),
    }
}

#[derive(Properties, PartialEq)]
struct SocialOverlayProps {
    content: Rc<SiteContent>,
    config: Rc<RuntimeConfig>,
    logger: Logger,
    on_close: Callback<()>,
}

#[function_component(SocialOverlayView)]
fn social_overlay_view(props: &SocialOverlayProps) -> Html {
    let now = use_frame_time();
    let clock = use_mut_ref(AnimationClock::new);
    let elapsed = clock.borrow_mut().sample(now);
    let viewport = use_viewport();
    let link_count = props.content.social_links.len();
    let config = Rc::clone(&props.config);
    let overlay = use_mut_ref(move || {
        let mut overlay = SocialOverlay::new(link_count, &config, viewport.0);
        overlay.open();
        overlay
    });
    let pointer = use_mut_ref(|| None::<(f64, f64)>);
    let projector = Projector::for_viewport(OVERLAY_CAMERA_Z, viewport);
    let logger = props.logger;

    {
        let overlay = overlay.clone();
        let pointer = pointer.clone();
        let camera = projector.camera;
        use_effect_with((now, viewport), move |(now, (width, _))| {
            let pointer_ndc = *pointer.borrow();
            let update = overlay.borrow_mut().sync_frame(*now, *width, camera, pointer_ndc);
            if let Some(breakpoint) = update.resized {
                logger.info(
                    "viewport_resized",
                    json!({ "width": width, "breakpoint": breakpoint.as_str() }),
                );
            }
            for event in update.events {
                log_overlay_event(&logger, event);
            }
            || ()
        });
    }

    let onmousemove = {
        let pointer = pointer.clone();
        Callback::from(move |event: MouseEvent| {
            let (width, height) = viewport_size();
            *pointer.borrow_mut() = Some(pointer_to_ndc(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                width,
                height,
            ));
        })
    };

    let onmouseleave = {
        let pointer = pointer.clone();
        Callback::from(move |_: MouseEvent| {
            pointer.borrow_mut().take();
        })
    };

    let onclick = {
        let overlay = overlay.clone();
        let content = Rc::clone(&props.content);
        Callback::from(move |_: MouseEvent| {
            let hovered = overlay.borrow().hovered_link();
            if let Some(link) = hovered.and_then(|id| content.social_links.get(id.0)) {
                open_in_new_context(&link.href);
            }
        })
    };

    let request = |mode: LayoutMode| {
        let overlay = overlay.clone();
        Callback::from(move |_: MouseEvent| {
            match overlay.borrow_mut().request_transition(mode, performance_now()) {
                TransitionRequest::Started { via_arc } => logger.info(
                    "overlay_transition_started",
                    json!({ "target": mode.as_str(), "via_arc": via_arc }),
                ),
                TransitionRequest::Rejected(reason) => logger.debug(
                    "overlay_transition_rejected",
                    json!({ "target": mode.as_str(), "reason": reason.as_str() }),
                ),
            }
        })
    };

    let on_flip = {
        let overlay = overlay.clone();
        Callback::from(move |_: MouseEvent| match overlay.borrow_mut().flip(performance_now()) {
            FlipRequest::Started => logger.info("overlay_flip", json!({ "phase": "started" })),
            FlipRequest::Rejected(reason) => logger.debug(
                "overlay_transition_rejected",
                json!({ "target": "flip", "reason": reason.as_str() }),
            ),
        })
    };

    let on_close = {
        let overlay = overlay.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            overlay.borrow_mut().close();
            on_close.emit(());
        })
    };

    let state = overlay.borrow();
    let center = projector.point(Vec3::ZERO).unwrap_or((0.0, 0.0));
    let positions = state.link_positions();
    let node_radius = state.metrics().node_radius;
    let spin = scene::social_node_spin(elapsed);

    let spokes = positions.iter().filter_map(|position| {
        let (x, y) = projector.point(*position)?;
        Some(html! {
            <line
                class="spoke"
                x1={num(center.0)}
                y1={num(center.1)}
                x2={num(x)}
                y2={num(y)}
            />
        })
    });

    let connector = state
        .connector_end()
        .and_then(|end| projector.point(end))
        .map(|(x, y)| {
            html! {
                <line
                    class="connector"
                    x1={num(center.0)}
                    y1={num(center.1)}
                    x2={num(x)}
                    y2={num(y)}
                />
            }
        });

    let nodes = props
        .content
        .social_links
        .iter()
        .zip(&positions)
        .enumerate()
        .filter_map(|(index, (link, position))| {
            let hovered = state.hovered_link().map(|id| id.0) == Some(index);
            let (scale, material) = scene::social_node_material(&link.color, hovered);
            let (x, y) = projector.point(*position)?;
            let radius = projector.radius(*position, node_radius * scale);
            let glow = 0.01 + 0.03 * material.emissive_intensity;
            Some(html! {
                <g class={classes!("social-node", hovered.then_some("is-hovered"))}>
                    <circle
                        cx={num(x)}
                        cy={num(y)}
                        r={num(radius)}
                        fill={link.color.clone()}
                        fill-opacity={num(material.opacity * 0.35)}
                        stroke={link.color.clone()}
                        stroke-width={num(glow)}
                    />
                    <ellipse
                        class="node-meridian"
                        cx={num(x)}
                        cy={num(y)}
                        rx={num(radius * spin.cos().abs())}
                        ry={num(radius)}
                        stroke={link.color.clone()}
                    />
                    <text
                        class="node-glyph"
                        x={num(x)}
                        y={num(y + radius * 0.35)}
                        font-size={num(radius)}
                        text-anchor="middle"
                    >
                        { icon_glyph(&link.icon) }
                    </text>
                </g>
            })
        });

    let label = state
        .hovered_link()
        .and_then(|id| props.content.social_links.get(id.0))
        .and_then(|link| {
            let (x, y) = projector.point(LABEL_ANCHOR)?;
            Some(html! {
                <text class="node-label" x={num(x)} y={num(y)} text-anchor="middle" font-size="0.06">
                    { link.name.clone() }
                </text>
            })
        });

    let (_, viewport_height) = viewport;
    let avatar_px = projector.radius(Vec3::ZERO, AVATAR_RADIUS) * viewport_height;
    let avatar_style = format!("width: {avatar_px:.1}px; height: {avatar_px:.1}px;");

    let busy = state.is_transitioning();
    let mode = state.layout_mode();
    let mode_button = |target: LayoutMode, text: &'static str| {
        html! {
            <button
                type="button"
                class="overlay-mode"
                aria-pressed={(mode == target).to_string()}
                disabled={busy}
                onclick={request(target)}
            >
                { text }
            </button>
        }
    };

    html! {
        <div class="social-overlay" role="dialog" aria-modal="true" aria-label="Social links">
            <svg
                class="scene-canvas overlay-canvas"
                viewBox={projector.view_box()}
                {onmousemove}
                {onmouseleave}
                {onclick}
            >
                { for spokes }
                { connector.unwrap_or_default() }
                { for nodes }
                { label.unwrap_or_default() }
            </svg>
            <img
                class="overlay-avatar"
                style={avatar_style}
                src={props.content.identity.avatar.clone()}
                alt={format!("{} ({}) profile", props.content.identity.name, props.content.identity.alias)}
            />
            <div class="overlay-controls glass">
                { mode_button(LayoutMode::Arc, "Arc") }
                { mode_button(LayoutMode::Docked(DockSide::Top), "Dock top") }
                { mode_button(LayoutMode::Docked(DockSide::Bottom), "Dock bottom") }
                { mode_button(LayoutMode::Circle, "Circle") }
                <button
                    type="button"
                    class="overlay-mode"
                    disabled={busy || mode != LayoutMode::Arc}
                    onclick={on_flip}
                >
                    {"Flip"}
                </button>
            </div>
            <button class="overlay-close" type="button" aria-label="Close social links" onclick={on_close}>
                {"×"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    content: Rc<SiteContent>,
    config: Rc<RuntimeConfig>,
    logger: Logger,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let shell = use_reducer(|| ShellStore(ShellState::default()));
    let state = &shell.0;
    let logger = props.logger;

    {
        let current = state.theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    let on_toggle_theme = {
        let shell = shell.clone();
        Callback::from(move |_: MouseEvent| {
            let next = shell.0.theme.toggled();
            apply_theme_with_transition(next);
            logger.info("theme_changed", json!({ "theme": next.as_str() }));
            shell.dispatch(ShellAction::ToggleTheme);
        })
    };

    let on_enter_terminal = {
        let shell = shell.clone();
        Callback::from(move |_: MouseEvent| {
            logger.info("terminal_opened", json!({}));
            shell.dispatch(ShellAction::EnterTerminal);
        })
    };

    let on_leave_terminal = {
        let shell = shell.clone();
        Callback::from(move |reason: &'static str| {
            logger.info("terminal_closed", json!({ "reason": reason }));
            shell.dispatch(ShellAction::LeaveTerminal);
        })
    };

    let on_open_overlay = {
        let shell = shell.clone();
        Callback::from(move |_: MouseEvent| {
            logger.info("overlay_opened", json!({}));
            shell.dispatch(ShellAction::OpenOverlay);
        })
    };

    let on_close_overlay = {
        let shell = shell.clone();
        Callback::from(move |_: ()| {
            logger.info("overlay_closed", json!({}));
            shell.dispatch(ShellAction::CloseOverlay);
        })
    };

    let on_open_github = {
        let github = props.content.identity.github.clone();
        Callback::from(move |_: MouseEvent| open_in_new_context(&github))
    };

    if state.terminal_open {
        return html! {
            <TerminalView
                content={Rc::clone(&props.content)}
                config={Rc::clone(&props.config)}
                logger={logger}
                on_leave={on_leave_terminal}
            />
        };
    }

    let content = &props.content;
    let identity = &content.identity;
    let dark = state.theme.is_dark();

    let skills = content.skills.iter().enumerate().map(|(index, skill)| {
        let flipped = state.hovered_skill == Some(index);
        let onmouseenter = {
            let shell = shell.clone();
            Callback::from(move |_: MouseEvent| shell.dispatch(ShellAction::HoverSkill(Some(index))))
        };
        let onmouseleave = {
            let shell = shell.clone();
            Callback::from(move |_: MouseEvent| shell.dispatch(ShellAction::HoverSkill(None)))
        };
        html! {
            <li class={classes!("skill-badge", flipped.then_some("is-flipped"))} {onmouseenter} {onmouseleave}>
                <span class="skill-face skill-front">{ skill.name.clone() }</span>
                <span class="skill-face skill-back" aria-hidden="true">{ icon_glyph(&skill.icon) }</span>
            </li>
        }
    });

    let projects = content.projects.iter().enumerate().map(|(index, project)| {
        html! { <ProjectCard index={index} project={project.clone()} /> }
    });

    let prompt = content.terminal.prompt.as_str();
    let preview_lines = ["whoami", "stack"].into_iter().map(|command| {
        let first_line = content
            .terminal
            .response(command)
            .and_then(|response| response.lines().next())
            .unwrap_or_default()
            .to_string();
        html! {
            <>
                <p class="line-prompt">{ format!("{prompt} {command}") }</p>
                <p class="line-output indent">{ first_line }</p>
            </>
        }
    });

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <ParticleBackdrop
                kind={ParticleStyle::Ambient}
                count={props.config.particle_count}
                seed={props.config.particle_seed}
                dark={dark}
                class={classes!("page-backdrop")}
            />
            <div class="page-shell">
                <header class="site-header glass">
                    <span class="brand">{ identity.brand.clone() }</span>
                    <nav class="site-nav" aria-label="Sections">
                        <a href="#about">{"/about"}</a>
                        <a href="#skills">{"/skills"}</a>
                        <a href="#projects">{"/projects"}</a>
                    </nav>
                    <div class="header-actions">
                        <button class="pill-button" type="button" onclick={on_open_overlay.clone()}>{"Contact Me"}</button>
                        <button
                            class="icon-button"
                            type="button"
                            aria-label="Open terminal mode"
                            onclick={on_enter_terminal}
                        >
                            {">_"}
                        </button>
                        <button
                            class="icon-button theme-toggle"
                            type="button"
                            aria-label={state.theme.toggle_label()}
                            aria-pressed={state.theme.pressed().to_string()}
                            onclick={on_toggle_theme}
                        >
                            <span aria-hidden="true">{ state.theme.icon() }</span>
                        </button>
                    </div>
                </header>

                <main id="content">
                    <section class="hero" aria-labelledby="hero-heading">
                        <HeroScene dark={dark} />
                        <h1 id="hero-heading">{ format!("{} ({})", identity.name, identity.alias) }</h1>
                        <p class="tagline">{ identity.tagline.clone() }</p>
                        <div class="hero-actions">
                            <button class="pill-button primary" type="button" onclick={on_open_overlay}>{"Contact Me"}</button>
                            <button class="pill-button" type="button" onclick={on_open_github}>{"GitHub"}</button>
                        </div>
                    </section>

                    <section id="about" class="section-block glass" aria-labelledby="about-heading">
                        <h2 id="about-heading">{"[ about_me ]"}</h2>
                        <p class="muted">{ identity.about.clone() }</p>
                        <div class="model-row">
                            <ModelView kind={ModelKind::Laptop} label="Web" />
                            <ModelView kind={ModelKind::Smartphone} label="Mobile" />
                            <ModelView kind={ModelKind::Server} label="Backend" />
                        </div>
                    </section>

                    <section id="skills" class="section-block" aria-labelledby="skills-heading">
                        <h2 id="skills-heading">{"[ tech_stack ]"}</h2>
                        <TechOrbit content={Rc::clone(content)} />
                        <ul class="skill-list">{ for skills }</ul>
                    </section>

                    <section id="projects" class="section-block" aria-labelledby="projects-heading">
                        <h2 id="projects-heading">{"[ projects ]"}</h2>
                        <div class="projects-stage">
                            <ParticleBackdrop
                                kind={ParticleStyle::Code}
                                count={props.config.particle_count * CODE_PARTICLE_FACTOR}
                                seed={props.config.particle_seed}
                                dark={dark}
                                class={classes!("projects-backdrop")}
                            />
                            <ProjectCubes />
                            <div class="project-grid">{ for projects }</div>
                        </div>
                    </section>

                    <section id="terminal-mode" class="section-block glass terminal-preview" aria-label="Terminal preview">
                        <div class="terminal-dots" aria-hidden="true">
                            <span class="dot dot-red"></span>
                            <span class="dot dot-yellow"></span>
                            <span class="dot dot-green"></span>
                        </div>
                        { for preview_lines }
                        <p class="line-prompt">{ prompt.to_string() }<span class="cursor">{"_"}</span></p>
                    </section>
                </main>

                <footer class="site-footer">
                    <a class="footer-cta" href={format!("mailto:{}", identity.email)}>{"Let's build something legendary"}</a>
                    <p class="muted">{ format!("Made with ♥ by {}", identity.name) }</p>
                </footer>
            </div>
            if state.overlay_open {
                <SocialOverlayView
                    content={Rc::clone(content)}
                    config={Rc::clone(&props.config)}
                    logger={logger}
                    on_close={on_close_overlay}
                />
            }
        </>
    }
}

pub fn run() {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        Logger::new(LogLevel::Warn).warn("mount_point_missing", json!({ "id": "app" }));
        return;
    };

    let config = RuntimeConfig::from_lookup(|key| root.get_attribute(&format!("data-{key}")));
    let logger = Logger::new(config.log_level);

    let content = match SiteContent::load_embedded() {
        Ok(content) => content,
        Err(err) => {
            logger.warn("content_invalid", json!({ "error": err.to_string() }));
            root.set_text_content(Some("Portfolio content failed to load."));
            return;
        }
    };

    logger.info(
        "content_loaded",
        json!({
            "skills": content.skills.len(),
            "projects": content.projects.len(),
            "social_links": content.social_links.len(),
        }),
    );

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            content: Rc::new(content),
            config: Rc::new(config),
            logger,
        },
    )
    .render();
}
