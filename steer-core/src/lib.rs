#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
use rand::Rng;

/// Default ease-in distance for `arrive`
pub const DEFAULT_EASE_DISTANCE: f64 = 100.0;

/// Default panic distance for `flee`
pub const DEFAULT_PANIC_DISTANCE: f64 = 100.0;

// Below this distance to the target the agent is treated as already there
// and no steering force is produced.
const MIN_STEER_DISTANCE: f64 = 1e-5;

/// A 2D vector used for position, velocity, and accumulated force
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        #[cfg(feature = "std")]
        {
            (self.x * self.x + self.y * self.y).sqrt()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sqrt(self.x * self.x + self.y * self.y)
        }
    }

    pub fn magnitude_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Scales the vector to the given length. A zero vector stays zero.
    pub fn normalize(&self, length: f64) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag * length,
                y: self.y / mag * length,
            }
        } else {
            Self::zero()
        }
    }

    pub fn distance(&self, other: &Vector2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        #[cfg(feature = "std")]
        {
            (dx * dx + dy * dy).sqrt()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sqrt(dx * dx + dy * dy)
        }
    }
}

impl core::ops::Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

/// Render pose: a 2D affine transform in canvas layout,
/// `x' = a*x + c*y + tx`, `y' = b*x + d*y + ty`.
///
/// Each operation concatenates onto the current matrix, so the call order
/// identity -> scale -> rotate -> translate builds "scaled, then rotated,
/// then placed". The agent writes this every tick; only a renderer reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Pose {
    pub const fn new() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn identity(&mut self) {
        *self = Self::new();
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.a *= sx;
        self.c *= sx;
        self.tx *= sx;
        self.b *= sy;
        self.d *= sy;
        self.ty *= sy;
    }

    pub fn rotate(&mut self, radians: f64) {
        #[cfg(feature = "std")]
        let (sin, cos) = (radians.sin(), radians.cos());
        #[cfg(not(feature = "std"))]
        let (sin, cos) = (libm::sin(radians), libm::cos(radians));

        let (a, b, c, d, tx, ty) = (self.a, self.b, self.c, self.d, self.tx, self.ty);
        self.a = cos * a - sin * b;
        self.c = cos * c - sin * d;
        self.tx = cos * tx - sin * ty;
        self.b = sin * a + cos * b;
        self.d = sin * c + cos * d;
        self.ty = sin * tx + cos * ty;
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.tx += x;
        self.ty += y;
    }

    /// Maps a local point through the transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-agent tunables for the steering behaviors
#[derive(Debug, Clone, Copy)]
pub struct SteerConfig {
    pub scale: f64,
    pub max_speed: f64,
    pub max_force: f64,
    pub wander_step: f64,
    pub wander_distance: f64,
    pub wander_radius: f64,
    pub bounds_centre: Vector2,
    pub bounds_radius: f64,
    pub radius: f64,
}

impl Default for SteerConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            max_speed: 6.0,
            max_force: 6.0,
            wander_step: 0.25,
            wander_distance: 100.0,
            wander_radius: 16.0,
            bounds_centre: Vector2::zero(),
            bounds_radius: 100.0,
            radius: 0.0,
        }
    }
}

/// A point-mass particle with steering behaviors.
///
/// Behavior calls accumulate forces into `acceleration`; a single `update`
/// per tick integrates them, clamps speed, bounces off the circular bounds,
/// and rebuilds the render pose.
#[derive(Debug, Clone)]
pub struct SteeringAgent {
    pub position: Vector2,
    pub old_position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub steering_force: Vector2,
    pub wander_theta: f64,
    pub config: SteerConfig,
    heading: f64,
    pose: Pose,
}

impl Default for SteeringAgent {
    fn default() -> Self {
        Self::new(SteerConfig::default())
    }
}

impl SteeringAgent {
    pub fn new(config: SteerConfig) -> Self {
        let mut agent = Self {
            position: Vector2::zero(),
            old_position: Vector2::zero(),
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            steering_force: Vector2::zero(),
            wander_theta: 0.0,
            config,
            heading: 0.0,
            pose: Pose::new(),
        };
        agent.refresh_pose();
        agent
    }

    /// Places an agent at a uniformly random point inside the bounds circle
    /// with a small random velocity.
    #[cfg(feature = "std")]
    pub fn random(config: SteerConfig, rng: &mut impl Rng) -> Self {
        let angle = rng.gen_range(0.0..core::f64::consts::TAU);
        let r = config.bounds_radius * rng.gen::<f64>().sqrt();
        let position = config.bounds_centre + Vector2::new(r * angle.cos(), r * angle.sin());
        let velocity = Vector2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));

        let mut agent = Self::new(config);
        agent.position = position;
        agent.old_position = position;
        agent.velocity = velocity;
        agent.refresh_pose();
        agent
    }

    /// Zeroes all motion vectors. Tunables and wander heading are untouched.
    pub fn reset(&mut self) {
        self.position = Vector2::zero();
        self.old_position = Vector2::zero();
        self.velocity = Vector2::zero();
        self.acceleration = Vector2::zero();
        self.steering_force = Vector2::zero();
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// The shared primitive under every directed behavior: the force that
    /// bends the current velocity toward the target.
    ///
    /// With `ease` set, the desired speed scales down linearly once the
    /// target is closer than `ease_distance`. The force magnitude is clamped
    /// to `max_force`.
    pub fn steer(&mut self, target: Vector2, ease: bool, ease_distance: f64) -> Vector2 {
        let offset = target - self.position;
        let distance = offset.magnitude();

        if distance <= MIN_STEER_DISTANCE {
            self.steering_force = Vector2::zero();
            return self.steering_force;
        }

        let mut desired = offset.normalize(1.0);
        if ease && distance < ease_distance {
            desired *= self.config.max_speed * (distance / ease_distance);
        } else {
            desired *= self.config.max_speed;
        }

        let mut force = desired - self.velocity;
        if force.magnitude_sq() > self.config.max_force * self.config.max_force {
            force = force.normalize(self.config.max_force);
        }

        self.steering_force = force;
        force
    }

    /// Pulls straight toward the target at full speed.
    pub fn seek(&mut self, target: Vector2, multiplier: f64) {
        let mut force = self.steer(target, false, DEFAULT_EASE_DISTANCE);
        if multiplier != 1.0 {
            force *= multiplier;
        }
        self.steering_force = force;
        self.acceleration += force;
    }

    /// Like `seek`, but decelerates smoothly inside `ease_distance`.
    pub fn arrive(&mut self, target: Vector2, ease_distance: f64, multiplier: f64) {
        let mut force = self.steer(target, true, ease_distance);
        if multiplier != 1.0 {
            force *= multiplier;
        }
        self.steering_force = force;
        self.acceleration += force;
    }

    /// Pushes away from the target while it is within `panic_distance`.
    /// An absent target or one beyond the panic radius applies no force.
    pub fn flee(&mut self, target: Option<Vector2>, panic_distance: f64, multiplier: f64) {
        let target = match target {
            Some(target) => target,
            None => return,
        };

        if self.position.distance(&target) > panic_distance {
            return;
        }

        let mut force = self.steer(target, true, -panic_distance);
        if multiplier != 1.0 {
            force *= multiplier;
        }
        force *= -1.0;
        self.steering_force = force;
        self.acceleration += force;
    }

    /// Drifts the heading by steering toward a point on a circle of
    /// `wander_radius` around a point `wander_distance` ahead. The per-call
    /// angle delta is a sign-flipped uniform draw from `[0, wander_step)`.
    #[cfg(feature = "std")]
    pub fn wander(&mut self, rng: &mut impl Rng, multiplier: f64) {
        let step = if self.config.wander_step > 0.0 {
            rng.gen_range(0.0..self.config.wander_step)
        } else {
            0.0
        };
        self.wander_theta += if rng.gen_bool(0.5) { -step } else { step };

        let mut ahead = self.velocity.normalize(1.0);
        ahead *= self.config.wander_distance;
        let ahead = ahead + self.position;

        let offset = Vector2::new(
            self.config.wander_radius * self.wander_theta.sin(),
            self.config.wander_radius * self.wander_theta.cos(),
        );

        let mut force = self.steer(ahead + offset, false, DEFAULT_EASE_DISTANCE);
        if multiplier != 1.0 {
            force *= multiplier;
        }
        self.steering_force = force;
        self.acceleration += force;
    }

    /// Integrates one tick: applies accumulated forces, clamps speed, bounces
    /// off the bounds circle, and rebuilds the render pose.
    pub fn update(&mut self) {
        self.old_position = self.position;

        self.velocity += self.acceleration;
        let max_speed = self.config.max_speed;
        if self.velocity.magnitude_sq() > max_speed * max_speed {
            self.velocity = self.velocity.normalize(max_speed);
        }

        self.position += self.velocity;
        self.acceleration = Vector2::zero();

        if self.position != self.old_position {
            let bound = self.config.bounds_radius + self.config.radius;
            let distance = self.position.distance(&self.config.bounds_centre);

            if distance > bound {
                self.position = (self.position - self.config.bounds_centre).normalize(bound);
                self.velocity *= -1.0;
                self.position += self.velocity;
                self.position += self.config.bounds_centre;
            }
        }

        if self.velocity != Vector2::zero() {
            #[cfg(feature = "std")]
            {
                self.heading = self.velocity.y.atan2(self.velocity.x);
            }
            #[cfg(not(feature = "std"))]
            {
                self.heading = libm::atan2(self.velocity.y, self.velocity.x);
            }
        }
        self.refresh_pose();
    }

    fn refresh_pose(&mut self) {
        self.pose.identity();
        self.pose.scale(self.config.scale, self.config.scale);
        self.pose.rotate(self.heading);
        self.pose
            .translate(self.position.x, self.position.y);
    }
}

/// How a swarm drives each agent every tick
#[derive(Debug, Clone, Copy)]
pub struct BehaviorMix {
    pub wander_weight: f64,
    pub arrive_weight: f64,
    pub flee_weight: f64,
    pub arrive_ease_distance: f64,
    pub flee_panic_distance: f64,
}

impl Default for BehaviorMix {
    fn default() -> Self {
        Self {
            wander_weight: 1.0,
            arrive_weight: 1.0,
            flee_weight: 1.0,
            arrive_ease_distance: DEFAULT_EASE_DISTANCE,
            flee_panic_distance: DEFAULT_PANIC_DISTANCE,
        }
    }
}

/// A fixed-capacity ensemble of agents for embedded (no_std) hosts.
///
/// Agents are independent: each tick runs the behavior mix and then the
/// integration for one agent at a time, with no neighbor awareness.
pub struct Swarm<const N: usize> {
    pub agents: heapless::Vec<SteeringAgent, N>,
    pub mix: BehaviorMix,
}

impl<const N: usize> Swarm<N> {
    pub fn new(mix: BehaviorMix) -> Self {
        Self {
            agents: heapless::Vec::new(),
            mix,
        }
    }

    pub fn add_agent(&mut self, agent: SteeringAgent) -> Result<(), SteeringAgent> {
        self.agents.push(agent)
    }

    pub fn update(&mut self, target: Option<Vector2>, threat: Option<Vector2>) {
        for agent in self.agents.iter_mut() {
            if let Some(target) = target {
                if self.mix.arrive_weight > 0.0 {
                    agent.arrive(target, self.mix.arrive_ease_distance, self.mix.arrive_weight);
                }
            }
            if self.mix.flee_weight > 0.0 {
                agent.flee(threat, self.mix.flee_panic_distance, self.mix.flee_weight);
            }
            agent.update();
        }
    }
}

/// A growable ensemble of agents for std hosts. Adds wander drift on top of
/// the arrive/flee mix; randomness comes from the caller's seedable RNG.
#[cfg(feature = "std")]
pub struct SwarmStd {
    pub agents: Vec<SteeringAgent>,
    pub mix: BehaviorMix,
}

#[cfg(feature = "std")]
impl SwarmStd {
    pub fn new(mix: BehaviorMix) -> Self {
        Self {
            agents: Vec::new(),
            mix,
        }
    }

    /// Builds a swarm of `count` randomly placed agents.
    pub fn random(count: usize, config: SteerConfig, mix: BehaviorMix, rng: &mut impl Rng) -> Self {
        let agents = (0..count).map(|_| SteeringAgent::random(config, rng)).collect();
        Self { agents, mix }
    }

    pub fn add_agent(&mut self, agent: SteeringAgent) {
        self.agents.push(agent);
    }

    pub fn update(
        &mut self,
        rng: &mut impl Rng,
        target: Option<Vector2>,
        threat: Option<Vector2>,
    ) {
        for agent in self.agents.iter_mut() {
            if self.mix.wander_weight > 0.0 {
                agent.wander(rng, self.mix.wander_weight);
            }
            if let Some(target) = target {
                if self.mix.arrive_weight > 0.0 {
                    agent.arrive(target, self.mix.arrive_ease_distance, self.mix.arrive_weight);
                }
            }
            if self.mix.flee_weight > 0.0 {
                agent.flee(threat, self.mix.flee_panic_distance, self.mix.flee_weight);
            }
            agent.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_vector2_operations() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);

        let sum = a + b;
        assert_eq!(sum, Vector2::new(4.0, 6.0));

        let diff = b - a;
        assert_eq!(diff, Vector2::new(2.0, 2.0));

        let scaled = a * 2.0;
        assert_eq!(scaled, Vector2::new(2.0, 4.0));

        let mut in_place = a;
        in_place *= -1.0;
        assert_eq!(in_place, Vector2::new(-1.0, -2.0));
    }

    #[test]
    fn test_vector2_magnitude_and_distance() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(v.magnitude_sq(), 25.0);
        assert_eq!(Vector2::zero().distance(&v), 5.0);
    }

    #[test]
    fn test_vector2_normalize_to_length() {
        let v = Vector2::new(3.0, 4.0).normalize(10.0);
        assert!((v.magnitude() - 10.0).abs() < EPS);
        assert!((v.x - 6.0).abs() < EPS);
        assert!((v.y - 8.0).abs() < EPS);
    }

    #[test]
    fn test_vector2_normalize_zero_stays_zero() {
        assert_eq!(Vector2::zero().normalize(5.0), Vector2::zero());
    }

    #[test]
    fn test_pose_composition_order() {
        let mut pose = Pose::new();
        pose.identity();
        pose.scale(2.0, 2.0);
        pose.rotate(core::f64::consts::FRAC_PI_2);
        pose.translate(10.0, 5.0);

        // local (1, 0): scaled to (2, 0), rotated to (0, 2), placed at (10, 7)
        let (x, y) = pose.apply(1.0, 0.0);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_config_defaults() {
        let config = SteerConfig::default();
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.max_speed, 6.0);
        assert_eq!(config.max_force, 6.0);
        assert_eq!(config.wander_step, 0.25);
        assert_eq!(config.wander_distance, 100.0);
        assert_eq!(config.wander_radius, 16.0);
        assert_eq!(config.bounds_centre, Vector2::zero());
        assert_eq!(config.bounds_radius, 100.0);
        assert_eq!(config.radius, 0.0);
    }

    #[test]
    fn test_speed_clamped_after_update() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.velocity = Vector2::new(10.0, 0.0);
        agent.acceleration = Vector2::new(5.0, 3.0);

        agent.update();

        assert!(agent.velocity.magnitude() <= agent.config.max_speed + EPS);
    }

    #[test]
    fn test_acceleration_cleared_by_update() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.seek(Vector2::new(50.0, 0.0), 1.0);
        assert!(agent.acceleration != Vector2::zero());

        agent.update();
        assert_eq!(agent.acceleration, Vector2::zero());
    }

    #[test]
    fn test_reset_zeroes_motion_state() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.position = Vector2::new(12.0, -7.0);
        agent.velocity = Vector2::new(3.0, 3.0);
        agent.seek(Vector2::new(50.0, 50.0), 1.0);
        agent.update();

        agent.reset();
        assert_eq!(agent.position, Vector2::zero());
        assert_eq!(agent.old_position, Vector2::zero());
        assert_eq!(agent.velocity, Vector2::zero());
        assert_eq!(agent.acceleration, Vector2::zero());
        assert_eq!(agent.steering_force, Vector2::zero());

        agent.reset();
        assert_eq!(agent.position, Vector2::zero());
        assert_eq!(agent.velocity, Vector2::zero());
        assert_eq!(agent.acceleration, Vector2::zero());
    }

    #[test]
    fn test_steer_at_target_is_zero_force() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.position = Vector2::new(3.0, 4.0);
        agent.velocity = Vector2::new(2.0, 0.0);

        let force = agent.steer(Vector2::new(3.0, 4.0), false, DEFAULT_EASE_DISTANCE);
        assert_eq!(force, Vector2::zero());
    }

    #[test]
    fn test_seek_full_speed_force() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.seek(Vector2::new(10.0, 0.0), 1.0);

        assert!((agent.acceleration.x - 6.0).abs() < EPS);
        assert!(agent.acceleration.y.abs() < EPS);
    }

    #[test]
    fn test_steer_force_clamped_to_max_force() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.velocity = Vector2::new(-6.0, 0.0);

        // desired (6, 0) minus velocity (-6, 0) is (12, 0), over the clamp
        let force = agent.steer(Vector2::new(10.0, 0.0), false, DEFAULT_EASE_DISTANCE);
        assert!((force.magnitude() - agent.config.max_force).abs() < EPS);
    }

    #[test]
    fn test_seek_converges_on_target() {
        let target = Vector2::new(10.0, 0.0);
        let mut agent = SteeringAgent::new(SteerConfig::default());

        let mut closest = f64::MAX;
        for _ in 0..50 {
            agent.seek(target, 1.0);
            agent.update();

            assert!(agent.velocity.magnitude() <= agent.config.max_speed + EPS);
            assert!(agent.position.x >= -0.1 && agent.position.x <= 16.0);
            closest = closest.min(agent.position.distance(&target));
        }

        assert!(closest <= 4.0 + EPS);
    }

    #[test]
    fn test_flee_deadband_outside_panic_distance() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.flee(Some(Vector2::new(200.0, 0.0)), DEFAULT_PANIC_DISTANCE, 1.0);
        assert_eq!(agent.acceleration, Vector2::zero());
    }

    #[test]
    fn test_flee_absent_target_is_noop() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.flee(None, DEFAULT_PANIC_DISTANCE, 1.0);
        assert_eq!(agent.acceleration, Vector2::zero());
    }

    #[test]
    fn test_flee_pushes_away_inside_panic_distance() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.flee(Some(Vector2::new(50.0, 0.0)), DEFAULT_PANIC_DISTANCE, 1.0);
        assert!(agent.acceleration.x < 0.0);
        assert!(agent.acceleration.y.abs() < EPS);
    }

    #[test]
    fn test_arrive_eases_below_seek_force() {
        let target = Vector2::new(30.0, 0.0);

        let mut arriving = SteeringAgent::new(SteerConfig::default());
        arriving.velocity = Vector2::new(3.0, 0.0);
        arriving.arrive(target, 50.0, 1.0);
        let arrive_force = arriving.steering_force.magnitude();

        let mut seeking = SteeringAgent::new(SteerConfig::default());
        seeking.velocity = Vector2::new(3.0, 0.0);
        seeking.seek(target, 1.0);
        let seek_force = seeking.steering_force.magnitude();

        assert!(arrive_force < seek_force);
    }

    #[test]
    fn test_wander_theta_delta_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.velocity = Vector2::new(1.0, 0.0);

        for _ in 0..200 {
            let before = agent.wander_theta;
            agent.wander(&mut rng, 1.0);
            let delta = agent.wander_theta - before;
            assert!(delta.abs() <= agent.config.wander_step + EPS);
        }
    }

    #[test]
    fn test_wander_accumulates_force() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.velocity = Vector2::new(2.0, 0.0);

        agent.wander(&mut rng, 1.0);
        assert!(agent.acceleration != Vector2::zero());
    }

    #[test]
    fn test_bounce_reflects_position_and_velocity() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.position = Vector2::new(98.0, 0.0);
        agent.old_position = agent.position;
        agent.velocity = Vector2::new(5.0, 0.0);

        agent.update();

        // ejected to (103, 0), projected back to (100, 0), bounced to (95, 0)
        assert!((agent.position.x - 95.0).abs() < EPS);
        assert!((agent.velocity.x + 5.0).abs() < EPS);
        assert!(
            agent.position.distance(&agent.config.bounds_centre)
                <= agent.config.bounds_radius + agent.config.radius + EPS
        );
    }

    #[test]
    fn test_bounce_respects_offset_centre() {
        let config = SteerConfig {
            bounds_centre: Vector2::new(50.0, 50.0),
            bounds_radius: 20.0,
            ..SteerConfig::default()
        };
        let mut agent = SteeringAgent::new(config);
        agent.position = Vector2::new(65.0, 50.0);
        agent.old_position = agent.position;
        agent.velocity = Vector2::new(10.0, 0.0);

        agent.update();

        assert!((agent.position.x - 60.0).abs() < EPS);
        assert!((agent.position.y - 50.0).abs() < EPS);
        assert!((agent.velocity.x + 10.0).abs() < EPS);
    }

    #[test]
    fn test_containment_holds_over_many_ticks() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.position = Vector2::new(90.0, 0.0);
        agent.old_position = agent.position;
        agent.velocity = Vector2::new(6.0, 0.0);

        let bound = agent.config.bounds_radius + agent.config.radius;
        for _ in 0..200 {
            agent.update();
            assert!(agent.position.distance(&agent.config.bounds_centre) <= bound + EPS);
        }
    }

    #[test]
    fn test_heading_retained_when_stopped() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.velocity = Vector2::new(0.0, 3.0);
        agent.update();
        assert!((agent.heading() - core::f64::consts::FRAC_PI_2).abs() < EPS);

        agent.velocity = Vector2::zero();
        agent.update();
        assert!((agent.heading() - core::f64::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_pose_places_agent_at_position() {
        let mut agent = SteeringAgent::new(SteerConfig::default());
        agent.velocity = Vector2::new(3.0, 0.0);
        agent.update();

        let (x, y) = agent.pose().apply(0.0, 0.0);
        assert!((x - agent.position.x).abs() < EPS);
        assert!((y - agent.position.y).abs() < EPS);
    }

    #[test]
    fn test_swarm_fixed_capacity_update() {
        let mut swarm: Swarm<4> = Swarm::new(BehaviorMix::default());
        for _ in 0..4 {
            swarm
                .add_agent(SteeringAgent::new(SteerConfig::default()))
                .ok()
                .unwrap();
        }
        assert!(swarm
            .add_agent(SteeringAgent::new(SteerConfig::default()))
            .is_err());

        swarm.update(Some(Vector2::new(50.0, 0.0)), None);
        for agent in swarm.agents.iter() {
            assert!(agent.velocity.x > 0.0);
        }
    }

    #[test]
    fn test_swarm_std_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = SteerConfig::default();
        let mut swarm = SwarmStd::random(10, config, BehaviorMix::default(), &mut rng);
        assert_eq!(swarm.agents.len(), 10);

        // a near-tangential bounce can leave an agent up to one velocity step
        // past the boundary for a single tick
        let bound = config.bounds_radius + config.radius + config.max_speed;
        for _ in 0..100 {
            swarm.update(&mut rng, Some(Vector2::new(20.0, 20.0)), None);
            for agent in swarm.agents.iter() {
                assert!(agent.velocity.magnitude() <= config.max_speed + EPS);
                assert!(agent.position.distance(&config.bounds_centre) <= bound + EPS);
            }
        }
    }
}
