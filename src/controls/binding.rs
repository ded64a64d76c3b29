//! Typed bindings between a widget and one property of the application state.

use std::fmt;

/// Getter/setter pair for a single property of `S`.
pub struct Accessor<S, T> {
    get: Box<dyn Fn(&S) -> T>,
    set: Box<dyn Fn(&mut S, T)>,
}

impl<S, T> Accessor<S, T> {
    pub fn new(get: impl Fn(&S) -> T + 'static, set: impl Fn(&mut S, T) + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    pub fn get(&self, state: &S) -> T {
        (self.get)(state)
    }

    pub fn set(&self, state: &mut S, value: T) {
        (self.set)(state, value)
    }
}

/// Closed numeric range with an optional step grid anchored at `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
}

impl NumberRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
            step: None,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = (step > 0.0).then_some(step);
        self
    }

    /// Clamps `value` into the range and snaps it to the step grid.
    ///
    /// Values already within `1e-4` of a grid point are returned unchanged so
    /// that a value written through the panel reads back exactly.
    pub fn constrain(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let value = value.clamp(self.min, self.max);
        match self.step {
            Some(step) => {
                let snapped = self.min + ((value - self.min) / step).round() * step;
                if (snapped - value).abs() < 1e-4 {
                    value
                } else {
                    snapped.clamp(self.min, self.max)
                }
            }
            None => value,
        }
    }

    /// Number of decimals worth displaying for this range.
    pub fn precision(&self) -> usize {
        match self.step {
            Some(step) if step < 1.0 => (-step.log10() - 1e-4).ceil().clamp(0.0, 6.0) as usize,
            Some(_) => 0,
            None => 3,
        }
    }
}

/// A value travelling between a widget and its property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Toggle(bool),
    Color([f32; 3]),
}

impl ControlValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ControlValue::Number(_) => "number",
            ControlValue::Toggle(_) => "toggle",
            ControlValue::Color(_) => "color",
        }
    }
}

/// How a controller reads and writes its property.
pub enum Binding<S> {
    Number {
        accessor: Accessor<S, f32>,
        range: NumberRange,
    },
    Toggle(Accessor<S, bool>),
    Color(Accessor<S, [f32; 3]>),
}

impl<S> Binding<S> {
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::Number { .. } => "number",
            Binding::Toggle(_) => "toggle",
            Binding::Color(_) => "color",
        }
    }

    /// Current value of the bound property.
    pub fn read(&self, state: &S) -> ControlValue {
        match self {
            Binding::Number { accessor, .. } => ControlValue::Number(accessor.get(state)),
            Binding::Toggle(accessor) => ControlValue::Toggle(accessor.get(state)),
            Binding::Color(accessor) => ControlValue::Color(accessor.get(state)),
        }
    }

    /// Writes `value` after constraining it. Returns the value actually
    /// stored, or the kind names when `value` does not fit this binding.
    pub(crate) fn write(
        &self,
        state: &mut S,
        value: ControlValue,
    ) -> Result<ControlValue, (&'static str, &'static str)> {
        match (self, value) {
            (Binding::Number { accessor, range }, ControlValue::Number(v)) => {
                let v = range.constrain(v);
                accessor.set(state, v);
                Ok(ControlValue::Number(v))
            }
            (Binding::Toggle(accessor), ControlValue::Toggle(v)) => {
                accessor.set(state, v);
                Ok(ControlValue::Toggle(v))
            }
            (Binding::Color(accessor), ControlValue::Color(c)) => {
                let c = c.map(|channel| if channel.is_nan() { 0.0 } else { channel.clamp(0.0, 1.0) });
                accessor.set(state, c);
                Ok(ControlValue::Color(c))
            }
            (binding, value) => Err((binding.kind(), value.kind())),
        }
    }
}

impl<S> fmt::Debug for Binding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Number { range, .. } => f.debug_struct("Number").field("range", range).finish(),
            Binding::Toggle(_) => f.write_str("Toggle"),
            Binding::Color(_) => f.write_str("Color"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_clamps_to_range() {
        let range = NumberRange::new(0.01, 10.0);
        assert_eq!(range.constrain(-3.0), 0.01);
        assert_eq!(range.constrain(42.0), 10.0);
        assert_eq!(range.constrain(2.5), 2.5);
        assert_eq!(range.constrain(f32::NAN), 0.01);
    }

    #[test]
    fn test_constrain_snaps_to_step() {
        let range = NumberRange::new(0.0, 180.0).with_step(0.01);
        assert_eq!(range.constrain(75.0), 75.0);
        assert!((range.constrain(75.004) - 75.0).abs() < 1e-4);
        assert!((range.constrain(75.006) - 75.01).abs() < 1e-4);

        let coarse = NumberRange::new(1.0, 9.0).with_step(2.0);
        assert_eq!(coarse.constrain(4.2), 5.0);
        assert_eq!(coarse.constrain(8.9), 9.0);
    }

    #[test]
    fn test_reversed_bounds_are_ordered() {
        let range = NumberRange::new(10.0, -10.0);
        assert_eq!((range.min, range.max), (-10.0, 10.0));
        assert_eq!(NumberRange::new(0.0, 1.0).with_step(0.0).step, None);
    }

    #[test]
    fn test_precision_follows_step() {
        assert_eq!(NumberRange::new(0.0, 1.0).with_step(0.01).precision(), 2);
        assert_eq!(NumberRange::new(0.0, 10.0).with_step(1.0).precision(), 0);
        assert_eq!(NumberRange::new(0.0, 1.0).precision(), 3);
    }

    #[test]
    fn test_write_rejects_wrong_kind() {
        let binding: Binding<f32> = Binding::Number {
            accessor: Accessor::new(|s: &f32| *s, |s: &mut f32, v| *s = v),
            range: NumberRange::new(0.0, 1.0),
        };
        let mut state = 0.5;

        assert_eq!(
            binding.write(&mut state, ControlValue::Toggle(true)),
            Err(("number", "toggle"))
        );
        assert_eq!(state, 0.5);
        assert_eq!(binding.write(&mut state, ControlValue::Number(2.0)), Ok(ControlValue::Number(1.0)));
        assert_eq!(binding.read(&state), ControlValue::Number(1.0));
    }

    #[test]
    fn test_color_channels_are_clamped() {
        let binding: Binding<[f32; 3]> =
            Binding::Color(Accessor::new(|s: &[f32; 3]| *s, |s: &mut [f32; 3], v| *s = v));
        let mut state = [0.0; 3];

        binding
            .write(&mut state, ControlValue::Color([1.5, -0.2, 0.25]))
            .expect("color write");
        assert_eq!(state, [1.0, 0.0, 0.25]);
    }
}
