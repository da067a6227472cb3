#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

pub const SEISMIC_POINTS_LAYER: LayerId = LayerId(1);
pub const FAULT_LINES_LAYER: LayerId = LayerId(2);
pub const FELT_AREA_LAYER: LayerId = LayerId(3);

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Legend label for the layer's traces.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::Layer;
    use crate::faults::FaultLayer;
    use crate::felt_area::FeltAreaLayer;
    use crate::points::PointLayer;

    #[test]
    fn dashboard_layers_have_distinct_ids() {
        let ids = [
            PointLayer::new().id(),
            FaultLayer::new().id(),
            FeltAreaLayer::new().id(),
        ];
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);
        assert_eq!(PointLayer::new().name(), "Earthquakes");
    }
}
