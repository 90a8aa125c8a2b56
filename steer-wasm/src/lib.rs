use rand::rngs::StdRng;
use rand::SeedableRng;
use steer_core::{SteeringAgent, SwarmStd, Vector2};
use steer_shared::{SteerSettings, StatusResponse, TargetUpdate};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, TouchEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// Keep the containment circle a little inside the canvas edge.
const BOUNDS_MARGIN: f64 = 16.0;

fn bounds_for_canvas(width: f64, height: f64) -> (Vector2, f64) {
    let centre = Vector2::new(width / 2.0, height / 2.0);
    let radius = (width.min(height) / 2.0 - BOUNDS_MARGIN).max(BOUNDS_MARGIN);
    (centre, radius)
}

#[wasm_bindgen]
pub struct SteerSimulation {
    swarm: SwarmStd,
    rng: StdRng,
    settings: SteerSettings,
    target: Option<Vector2>,
    threat: Option<Vector2>,
    tick: u64,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl SteerSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f64,
        height: f64,
        agent_count: usize,
    ) -> Result<SteerSimulation, JsValue> {
        console_log!("Initializing steering simulation with {} agents", agent_count);

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let (centre, radius) = bounds_for_canvas(width, height);
        let mut settings = SteerSettings::default();
        settings.bounds_radius = radius;

        let mut rng = StdRng::from_entropy();
        let config = settings.to_config(centre);
        let swarm = SwarmStd::random(agent_count, config, settings.to_mix(), &mut rng);

        Ok(SteerSimulation {
            swarm,
            rng,
            settings,
            target: None,
            threat: None,
            tick: 0,
            canvas,
            context,
        })
    }

    pub fn update(&mut self) {
        self.swarm.update(&mut self.rng, self.target, self.threat);
        self.tick += 1;
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context.set_fill_style_str("#0a0a0a");
        self.context.fill_rect(0.0, 0.0, width, height);

        self.draw_bounds()?;

        for agent in &self.swarm.agents {
            self.draw_agent(agent)?;
        }

        if let Some(target) = self.target {
            self.draw_marker(target, "rgba(120, 220, 120, 0.8)")?;
        }
        if let Some(threat) = self.threat {
            self.draw_marker(threat, "rgba(220, 120, 120, 0.8)")?;
        }

        Ok(())
    }

    fn draw_bounds(&self) -> Result<(), JsValue> {
        let Some(agent) = self.swarm.agents.first() else {
            return Ok(());
        };
        let centre = agent.config.bounds_centre;
        let radius = agent.config.bounds_radius + agent.config.radius;

        self.context.begin_path();
        self.context
            .arc(centre.x, centre.y, radius, 0.0, std::f64::consts::TAU)?;
        self.context
            .set_stroke_style_str("rgba(255, 255, 255, 0.15)");
        self.context.set_line_width(1.0);
        self.context.stroke();
        Ok(())
    }

    fn draw_agent(&self, agent: &SteeringAgent) -> Result<(), JsValue> {
        let size = 8.0;
        let pose = agent.pose();

        self.context.save();
        // The agent's render pose already encodes scale, heading, and position
        self.context
            .set_transform(pose.a, pose.b, pose.c, pose.d, pose.tx, pose.ty)?;

        // Triangle pointing along local +x, the heading axis
        self.context.begin_path();
        self.context.move_to(size, 0.0);
        self.context.line_to(-size / 2.0, size / 2.0);
        self.context.line_to(-size / 2.0, -size / 2.0);
        self.context.close_path();

        let speed = agent.velocity.magnitude();
        let normalized_speed = (speed / agent.config.max_speed).min(1.0);
        let hue = 180.0 + normalized_speed * 60.0;
        let color = format!("hsl({}, 70%, 60%)", hue);

        self.context.set_fill_style_str(&color);
        self.context.fill();

        self.context
            .set_stroke_style_str("rgba(255, 255, 255, 0.3)");
        self.context.set_line_width(1.0);
        self.context.stroke();

        self.context.restore();

        Ok(())
    }

    fn draw_marker(&self, at: Vector2, color: &str) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context
            .arc(at.x, at.y, 4.0, 0.0, std::f64::consts::TAU)?;
        self.context.set_fill_style_str(color);
        self.context.fill();
        Ok(())
    }

    pub fn add_agent_at(&mut self, x: f64, y: f64) {
        let config = self
            .swarm
            .agents
            .first()
            .map(|agent| agent.config)
            .unwrap_or_else(|| {
                let (centre, radius) = bounds_for_canvas(
                    self.canvas.width() as f64,
                    self.canvas.height() as f64,
                );
                let mut settings = self.settings;
                settings.bounds_radius = radius;
                settings.to_config(centre)
            });

        let mut agent = SteeringAgent::new(config);
        agent.position = Vector2::new(x, y);
        agent.old_position = agent.position;
        agent.velocity = Vector2::new(
            (js_sys::Math::random() - 0.5) * 4.0,
            (js_sys::Math::random() - 0.5) * 4.0,
        );
        self.swarm.add_agent(agent);
        console_log!(
            "Added agent at ({}, {}). Total agents: {}",
            x,
            y,
            self.swarm.agents.len()
        );
    }

    pub fn set_target_at(&mut self, x: f64, y: f64) {
        self.target = Some(Vector2::new(x, y));
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn set_threat_at(&mut self, x: f64, y: f64) {
        self.threat = Some(Vector2::new(x, y));
    }

    pub fn clear_threat(&mut self) {
        self.threat = None;
    }

    pub fn handle_mouse_click(&mut self, event: MouseEvent) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();

        if event.shift_key() {
            self.set_threat_at(x, y);
        } else {
            self.set_target_at(x, y);
        }
    }

    pub fn handle_touch(&mut self, event: TouchEvent) {
        let touches = event.touches();
        if let Some(touch) = touches.item(0) {
            let canvas_element: &Element = self.canvas.as_ref();
            let rect = canvas_element.get_bounding_client_rect();
            let x = touch.client_x() as f64 - rect.left();
            let y = touch.client_y() as f64 - rect.top();
            self.set_target_at(x, y);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);

        let (centre, radius) = bounds_for_canvas(width, height);
        self.settings.bounds_radius = radius;
        for agent in self.swarm.agents.iter_mut() {
            agent.config.bounds_centre = centre;
            agent.config.bounds_radius = radius;
        }
        console_log!("Resized to {}x{}", width, height);
    }

    /// Applies a JSON-encoded `SteerSettings` to every agent and the mix.
    /// The containment circle keeps following the canvas.
    pub fn apply_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: SteerSettings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let (centre, radius) = bounds_for_canvas(
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        let mut settings = settings;
        settings.bounds_radius = radius;

        let config = settings.to_config(centre);
        for agent in self.swarm.agents.iter_mut() {
            agent.config = config;
        }
        self.swarm.mix = settings.to_mix();
        self.settings = settings;
        Ok(())
    }

    /// Applies a JSON-encoded `TargetUpdate`; a `null` position clears the
    /// target and the swarm drifts freely.
    pub fn apply_target_json(&mut self, json: &str) -> Result<(), JsValue> {
        let update: TargetUpdate =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.target = update.position.map(|p| Vector2::new(p.x, p.y));
        Ok(())
    }

    pub fn status_json(&self) -> Result<String, JsValue> {
        let status = StatusResponse {
            agent_count: self.swarm.agents.len(),
            tick: self.tick,
            target_active: self.target.is_some(),
        };
        serde_json::to_string(&status).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn agent_count(&self) -> usize {
        self.swarm.agents.len()
    }

    pub fn set_max_speed(&mut self, speed: f64) {
        self.settings.max_speed = speed;
        for agent in self.swarm.agents.iter_mut() {
            agent.config.max_speed = speed;
        }
    }

    pub fn set_max_force(&mut self, force: f64) {
        self.settings.max_force = force;
        for agent in self.swarm.agents.iter_mut() {
            agent.config.max_force = force;
        }
    }

    pub fn set_wander_weight(&mut self, weight: f64) {
        self.settings.wander_weight = weight;
        self.swarm.mix.wander_weight = weight;
    }

    pub fn set_arrive_weight(&mut self, weight: f64) {
        self.settings.arrive_weight = weight;
        self.swarm.mix.arrive_weight = weight;
    }

    pub fn set_flee_weight(&mut self, weight: f64) {
        self.settings.flee_weight = weight;
        self.swarm.mix.flee_weight = weight;
    }
}
