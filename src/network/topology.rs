use crate::error::Error;

/// Ordered layer widths, input first and output last. Immutable once the
/// owning network is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    layers: Vec<usize>,
}

impl Topology {
    /// Builds a topology from an explicit width sequence.
    ///
    /// At least two layers are required and every width must be >= 1.
    pub fn new(layers: Vec<usize>) -> Result<Topology, Error> {
        if layers.len() < 2 || layers.iter().any(|&width| width == 0) {
            return Err(Error::InvalidTopology { layers });
        }
        Ok(Topology { layers })
    }

    /// One hidden layer: `[input, hidden, output]`.
    pub fn with_hidden(input: usize, hidden: usize, output: usize) -> Result<Topology, Error> {
        Topology::new(vec![input, hidden, output])
    }

    /// `hidden_layers` hidden layers of equal width between input and
    /// output. Zero hidden layers yields a direct input-to-output network.
    pub fn with_stacked_hidden(
        input: usize,
        hidden_layers: usize,
        hidden_width: usize,
        output: usize,
    ) -> Result<Topology, Error> {
        let mut layers = Vec::with_capacity(hidden_layers + 2);
        layers.push(input);
        layers.extend(std::iter::repeat(hidden_width).take(hidden_layers));
        layers.push(output);
        Topology::new(layers)
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0]
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    /// Number of layer transitions; each owns one weight matrix and one
    /// bias vector.
    pub fn transitions(&self) -> usize {
        self.layers.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_explicit_width_sequences() {
        let topology = Topology::new(vec![400, 10, 1]).unwrap();
        assert_eq!(topology.layers(), &[400, 10, 1]);
        assert_eq!(topology.input_size(), 400);
        assert_eq!(topology.output_size(), 1);
        assert_eq!(topology.transitions(), 2);
    }

    #[test]
    fn rejects_fewer_than_two_layers() {
        for layers in [vec![], vec![4]] {
            match Topology::new(layers.clone()) {
                Err(Error::InvalidTopology { layers: reported }) => assert_eq!(reported, layers),
                other => panic!("expected InvalidTopology, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_zero_width_layers() {
        assert!(matches!(
            Topology::new(vec![4, 0, 1]),
            Err(Error::InvalidTopology { .. })
        ));
        assert!(matches!(
            Topology::with_hidden(0, 5, 1),
            Err(Error::InvalidTopology { .. })
        ));
    }

    #[test]
    fn with_hidden_builds_three_layers() {
        let topology = Topology::with_hidden(4, 5, 1).unwrap();
        assert_eq!(topology.layers(), &[4, 5, 1]);
    }

    #[test]
    fn with_stacked_hidden_repeats_the_hidden_width() {
        let topology = Topology::with_stacked_hidden(400, 2, 10, 1).unwrap();
        assert_eq!(topology.layers(), &[400, 10, 10, 1]);
    }

    #[test]
    fn with_stacked_hidden_allows_zero_hidden_layers() {
        let topology = Topology::with_stacked_hidden(4, 0, 9, 1).unwrap();
        assert_eq!(topology.layers(), &[4, 1]);
        assert_eq!(topology.transitions(), 1);
    }
}
