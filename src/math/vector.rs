//! Unit-typed 3D vectors backed by `glam::DVec3`.

use std::fmt;
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, DVec3};

use super::units::{
    Meters, MetersPerSecond, MetersPerSquaredSecond, Quantity, Scalar, Unit, UnitDiv, UnitMul,
};

/// Immutable 3D vector whose components share one physical unit.
#[derive(Clone, Copy, Default)]
pub struct Vector<U: Unit> {
    inner: DVec3,
    unit: PhantomData<U>,
}

pub type Direction = Vector<Scalar>;
pub type Position = Vector<Meters>;
pub type Velocity = Vector<MetersPerSecond>;
pub type AccelerationVector = Vector<MetersPerSquaredSecond>;

impl<U: Unit> Vector<U> {
    pub const ZERO: Self = Self::from_dvec3(DVec3::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    #[inline]
    pub const fn from_dvec3(inner: DVec3) -> Self {
        Self {
            inner,
            unit: PhantomData,
        }
    }

    /// Build a vector from the XZ plane coordinates plus an explicit height.
    #[inline]
    pub fn from_xz(xz: DVec2, y: f64) -> Self {
        Self::new(xz.x, y, xz.y)
    }

    #[inline]
    pub const fn as_dvec3(self) -> DVec3 {
        self.inner
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.inner.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.inner.y
    }

    #[inline]
    pub fn z(self) -> f64 {
        self.inner.z
    }

    /// Projection onto the XZ plane, as `(x, z)`.
    #[inline]
    pub fn xz(self) -> DVec2 {
        DVec2::new(self.inner.x, self.inner.z)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.inner == DVec3::ZERO
    }

    #[inline]
    pub fn magnitude(self) -> Quantity<U> {
        Quantity::new(self.inner.length())
    }

    /// Squared magnitude as a raw value.
    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        self.inner.length_squared()
    }

    #[inline]
    pub fn distance(self, other: Self) -> Quantity<U> {
        Quantity::new(self.inner.distance(other.inner))
    }

    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        self.inner.distance_squared(other.inner)
    }

    /// Unit direction of this vector. The zero vector stays zero.
    #[inline]
    pub fn normalize(self) -> Direction {
        Vector::from_dvec3(self.inner.normalize_or_zero())
    }

    #[inline]
    pub fn dot<B: Unit>(self, rhs: Vector<B>) -> Quantity<<U as UnitMul<B>>::Output>
    where
        U: UnitMul<B>,
    {
        Quantity::new(self.inner.dot(rhs.inner))
    }

    #[inline]
    pub fn cross<B: Unit>(self, rhs: Vector<B>) -> Vector<<U as UnitMul<B>>::Output>
    where
        U: UnitMul<B>,
    {
        Vector::from_dvec3(self.inner.cross(rhs.inner))
    }

    /// Perpendicular of this vector inside the XZ plane (`y` is dropped).
    #[inline]
    pub fn perpendicular_xz(self) -> Self {
        Self::new(-self.inner.z, 0.0, self.inner.x)
    }

    #[inline]
    pub fn abs_diff_eq(self, other: Self, max_abs_diff: f64) -> bool {
        self.inner.abs_diff_eq(other.inner, max_abs_diff)
    }

    /// Reinterpret the raw components under another unit.
    #[inline]
    pub fn cast<V: Unit>(self) -> Vector<V> {
        Vector::from_dvec3(self.inner)
    }
}

impl<U: Unit> fmt::Debug for Vector<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?}, {:?}, {:?}){}",
            self.inner.x,
            self.inner.y,
            self.inner.z,
            U::SYMBOL
        )
    }
}

impl<U: Unit> PartialEq for Vector<U> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<U: Unit> Add for Vector<U> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_dvec3(self.inner + rhs.inner)
    }
}

impl<U: Unit> AddAssign for Vector<U> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.inner += rhs.inner;
    }
}

impl<U: Unit> Sub for Vector<U> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_dvec3(self.inner - rhs.inner)
    }
}

impl<U: Unit> SubAssign for Vector<U> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.inner -= rhs.inner;
    }
}

impl<U: Unit> Neg for Vector<U> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_dvec3(-self.inner)
    }
}

impl<U: Unit> Mul<f64> for Vector<U> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::from_dvec3(self.inner * rhs)
    }
}

impl<U: Unit> Div<f64> for Vector<U> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::from_dvec3(self.inner / rhs)
    }
}

impl<A, B> Mul<Quantity<B>> for Vector<A>
where
    A: UnitMul<B>,
    B: Unit,
{
    type Output = Vector<<A as UnitMul<B>>::Output>;

    #[inline]
    fn mul(self, rhs: Quantity<B>) -> Self::Output {
        Vector::from_dvec3(self.inner * rhs.value())
    }
}

impl<A, B> Div<Quantity<B>> for Vector<A>
where
    A: UnitDiv<B>,
    B: Unit,
{
    type Output = Vector<<A as UnitDiv<B>>::Output>;

    #[inline]
    fn div(self, rhs: Quantity<B>) -> Self::Output {
        Vector::from_dvec3(self.inner / rhs.value())
    }
}

impl<U: Unit> Sum for Vector<U> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::units::{meters, seconds, Length, Seconds};

    #[test]
    fn test_velocity_times_time_is_displacement() {
        let velocity = Velocity::new(1.0, 0.0, -2.0);
        let displacement: Position = velocity * seconds(0.5);
        assert_eq!(displacement, Position::new(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_displacement_over_time_is_velocity() {
        let displacement = Position::new(4.0, 0.0, 0.0);
        let velocity: Vector<MetersPerSecond> = displacement / Quantity::<Seconds>::new(2.0);
        assert_eq!(velocity, Velocity::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_normalize_zero_stays_zero() {
        assert!(Velocity::ZERO.normalize().is_zero());
        let direction = Position::new(3.0, 0.0, 4.0).normalize();
        assert!((direction.magnitude().value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dot_with_direction_projects() {
        let velocity = Velocity::new(3.0, 1.0, 0.0);
        let projected = velocity.dot(Direction::new(1.0, 0.0, 0.0));
        assert_eq!(projected.value(), 3.0);
    }

    #[test]
    fn test_distance_and_magnitude() {
        let a = Position::new(1.0, 0.0, 1.0);
        let b = Position::new(4.0, 0.0, 5.0);
        let distance: Length = a.distance(b);
        assert_eq!(distance, meters(5.0));
        assert_eq!((b - a).magnitude(), meters(5.0));
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_perpendicular_xz_is_orthogonal() {
        let along = Position::new(3.0, 2.0, 1.0);
        let normal = along.perpendicular_xz();
        assert_eq!(normal.y(), 0.0);
        assert_eq!(normal.xz().dot(along.xz()), 0.0);
    }

    #[test]
    fn test_cross_of_lengths_is_area() {
        let x = Position::new(1.0, 0.0, 0.0);
        let z = Position::new(0.0, 0.0, 1.0);
        let normal = x.cross(z);
        assert_eq!(normal.as_dvec3(), DVec3::new(0.0, -1.0, 0.0));
    }
}
