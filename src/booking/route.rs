use crate::booking::Error;
use crate::network::Stop;

/// Checks that two stations form a valid, correctly-ordered travel segment
/// of one train's stop sequence.
///
/// Pure over the snapshot it is given: callers fetch the train's stops fresh
/// per request and no synchronization happens here. Returns the two resolved
/// stops so callers can reuse their positions.
pub fn validate_segment<'a>(
    stops: &[&'a Stop],
    from_station_id: &str,
    to_station_id: &str,
) -> Result<(&'a Stop, &'a Stop), Error> {
    let from = stops
        .iter()
        .find(|stop| stop.station_id.as_ref() == from_station_id)
        .copied()
        .ok_or_else(|| Error::StationNotInRoute(from_station_id.to_string()))?;
    let to = stops
        .iter()
        .find(|stop| stop.station_id.as_ref() == to_station_id)
        .copied()
        .ok_or_else(|| Error::StationNotInRoute(to_station_id.to_string()))?;

    if from.stop_number >= to.stop_number {
        return Err(Error::InvalidSegmentOrder {
            from: from_station_id.to_string(),
            to: to_station_id.to_string(),
        });
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(station_id: &str, stop_number: u32) -> Stop {
        Stop {
            train_id: "T1".into(),
            station_id: station_id.into(),
            arrival: None,
            departure: None,
            stop_number,
        }
    }

    #[test]
    fn forward_segment_is_valid() {
        let stops = [stop("A", 1), stop("B", 2), stop("C", 3)];
        let refs: Vec<&Stop> = stops.iter().collect();
        let (from, to) = validate_segment(&refs, "A", "C").unwrap();
        assert_eq!(from.stop_number, 1);
        assert_eq!(to.stop_number, 3);
    }

    #[test]
    fn backward_segment_is_rejected() {
        let stops = [stop("A", 1), stop("B", 2), stop("C", 3)];
        let refs: Vec<&Stop> = stops.iter().collect();
        let result = validate_segment(&refs, "C", "A");
        assert!(matches!(result, Err(Error::InvalidSegmentOrder { .. })));
    }

    #[test]
    fn same_station_is_rejected() {
        let stops = [stop("A", 1), stop("B", 2)];
        let refs: Vec<&Stop> = stops.iter().collect();
        let result = validate_segment(&refs, "B", "B");
        assert!(matches!(result, Err(Error::InvalidSegmentOrder { .. })));
    }

    #[test]
    fn unknown_station_is_rejected() {
        let stops = [stop("A", 1), stop("B", 2), stop("C", 3)];
        let refs: Vec<&Stop> = stops.iter().collect();
        let result = validate_segment(&refs, "A", "Z");
        assert!(matches!(result, Err(Error::StationNotInRoute(id)) if id == "Z"));
    }

    #[test]
    fn endpoint_sentinels_order_correctly() {
        let stops = [stop("S", 0), stop("A", 1), stop("D", u32::MAX)];
        let refs: Vec<&Stop> = stops.iter().collect();
        assert!(validate_segment(&refs, "S", "D").is_ok());
        assert!(validate_segment(&refs, "A", "D").is_ok());
        assert!(matches!(
            validate_segment(&refs, "D", "A"),
            Err(Error::InvalidSegmentOrder { .. })
        ));
    }
}
