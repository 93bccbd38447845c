/// An update rule for a flat parameter vector.
pub trait Optimizer {
    /// Takes one step using the gradient of the last batch.
    ///
    /// `params` and `grad` have the same length.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]);
}
