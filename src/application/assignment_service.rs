use uuid::Uuid;

use crate::domain::courier::{Availability, CourierProfile};
use crate::domain::errors::DomainError;
use crate::domain::geo::{self, GeoPoint, MAX_ASSIGNMENT_RADIUS_KM};
use crate::domain::order::{AssignmentFeed, NearbyOrder, OrderView};
use crate::domain::ports::{ClaimOutcome, DeliveryRepository, OrderRepository};

/// Geofenced matching between couriers and unassigned orders.
pub struct AssignmentService<O, D> {
    orders: O,
    couriers: D,
}

impl<O: OrderRepository, D: DeliveryRepository> AssignmentService<O, D> {
    pub fn new(orders: O, couriers: D) -> Self {
        Self { orders, couriers }
    }

    /// All unassigned orders within [`MAX_ASSIGNMENT_RADIUS_KM`] of the
    /// courier's last-known position, ascending by distance. A courier with
    /// no stored position is an input error, not an empty feed.
    pub fn assignments_for(&self, courier_id: Uuid) -> Result<AssignmentFeed, DomainError> {
        let profile = self
            .couriers
            .find_profile(courier_id)?
            .ok_or(DomainError::NotFound("delivery profile"))?;
        let origin = profile.location.ok_or(DomainError::MissingLocation)?;

        let mut nearby: Vec<NearbyOrder> = self
            .orders
            .assignable_orders()?
            .into_iter()
            .map(|order| NearbyOrder {
                distance_km: geo::haversine_km(origin, order.dropoff),
                order,
            })
            .filter(|n| n.distance_km <= MAX_ASSIGNMENT_RADIUS_KM)
            .collect();
        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        Ok(AssignmentFeed {
            delivery_location: origin,
            max_distance_km: MAX_ASSIGNMENT_RADIUS_KM,
            orders: nearby,
        })
    }

    /// Optimistic claim: at most one courier ever wins an order. A lost race
    /// is reported as [`DomainError::AlreadyAssigned`] with no retry and no
    /// alternate suggestion.
    pub fn claim(&self, courier_id: Uuid, order_id: Uuid) -> Result<OrderView, DomainError> {
        match self.orders.claim_for_delivery(order_id, courier_id)? {
            ClaimOutcome::Claimed(order) => Ok(order),
            ClaimOutcome::AlreadyAssigned => Err(DomainError::AlreadyAssigned),
            ClaimOutcome::NotFound => Err(DomainError::NotFound("order")),
        }
    }

    pub fn update_location(
        &self,
        courier_id: Uuid,
        latitude: f64,
        longitude: f64,
    ) -> Result<CourierProfile, DomainError> {
        let location = GeoPoint::validated(latitude, longitude)?;
        self.couriers.update_location(courier_id, location)
    }

    pub fn set_availability(
        &self,
        courier_id: Uuid,
        availability: Availability,
    ) -> Result<CourierProfile, DomainError> {
        self.couriers.set_availability(courier_id, availability)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::*;
    use crate::domain::courier::ProfileStatus;
    use crate::domain::lifecycle::{OrderStatus, PaymentStatus, Transition};
    use crate::domain::order::{ListResult, NewOrderInput, PaymentMethod};

    struct FakeOrders {
        orders: Mutex<Vec<OrderView>>,
    }

    impl FakeOrders {
        fn with(orders: Vec<OrderView>) -> Self {
            Self {
                orders: Mutex::new(orders),
            }
        }
    }

    impl OrderRepository for FakeOrders {
        fn create(&self, _input: NewOrderInput) -> Result<OrderView, DomainError> {
            unreachable!("not exercised by assignment tests")
        }

        fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
            Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
        }

        fn list(&self, _page: i64, _limit: i64) -> Result<ListResult, DomainError> {
            unreachable!("not exercised by assignment tests")
        }

        fn update_status(
            &self,
            _id: Uuid,
            _expected: OrderStatus,
            _transition: Transition,
        ) -> Result<Option<OrderView>, DomainError> {
            unreachable!("not exercised by assignment tests")
        }

        fn assignable_orders(&self) -> Result<Vec<OrderView>, DomainError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.delivery_id.is_none())
                .cloned()
                .collect())
        }

        fn claim_for_delivery(
            &self,
            order_id: Uuid,
            courier_id: Uuid,
        ) -> Result<ClaimOutcome, DomainError> {
            let mut orders = self.orders.lock().unwrap();
            match orders.iter_mut().find(|o| o.id == order_id) {
                None => Ok(ClaimOutcome::NotFound),
                Some(order) if order.delivery_id.is_some() => Ok(ClaimOutcome::AlreadyAssigned),
                Some(order) => {
                    order.delivery_id = Some(courier_id);
                    order.status = OrderStatus::AssignedForDelivery;
                    Ok(ClaimOutcome::Claimed(order.clone()))
                }
            }
        }
    }

    struct FakeCouriers {
        profile: Option<CourierProfile>,
    }

    impl DeliveryRepository for FakeCouriers {
        fn find_profile(&self, _courier_id: Uuid) -> Result<Option<CourierProfile>, DomainError> {
            Ok(self.profile.clone())
        }

        fn update_location(
            &self,
            _courier_id: Uuid,
            _location: GeoPoint,
        ) -> Result<CourierProfile, DomainError> {
            unreachable!("not exercised by assignment tests")
        }

        fn set_availability(
            &self,
            _courier_id: Uuid,
            _availability: Availability,
        ) -> Result<CourierProfile, DomainError> {
            unreachable!("not exercised by assignment tests")
        }
    }

    fn order_at(latitude: f64, longitude: f64) -> OrderView {
        OrderView {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            quantity: 1,
            total_price: BigDecimal::from_str("9.99").unwrap(),
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::PaymentConfirmed,
            payment_method: PaymentMethod::CashOnDelivery,
            telebirr_txn_number: None,
            telebirr_screenshot: None,
            delivery_id: None,
            dropoff: GeoPoint { latitude, longitude },
            created_at: Utc::now(),
        }
    }

    fn courier_at(location: Option<GeoPoint>) -> FakeCouriers {
        FakeCouriers {
            profile: Some(CourierProfile {
                user_id: Uuid::new_v4(),
                vehicle_type: "motorbike".to_string(),
                plate_number: "AA-1234".to_string(),
                license_number: "DL-5678".to_string(),
                national_id: "NID-0001".to_string(),
                profile_image: None,
                id_card_image: None,
                status: ProfileStatus::Approved,
                availability: Availability::Online,
                location,
                updated_at: Utc::now(),
            }),
        }
    }

    const COURIER: GeoPoint = GeoPoint {
        latitude: 9.0300,
        longitude: 38.7400,
    };

    #[test]
    fn filters_orders_beyond_the_radius() {
        let near = order_at(9.0350, 38.7420); // ~0.6 km
        let far = order_at(9.2000, 38.9000); // ~25 km
        let near_id = near.id;
        let svc = AssignmentService::new(
            FakeOrders::with(vec![far, near]),
            courier_at(Some(COURIER)),
        );

        let feed = svc.assignments_for(Uuid::new_v4()).unwrap();

        assert_eq!(feed.max_distance_km, 10.0);
        assert_eq!(feed.orders.len(), 1);
        assert_eq!(feed.orders[0].order.id, near_id);
        assert!(feed.orders[0].distance_km < 1.0);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        // due north of the courier: ~9.9 km stays in, ~10.1 km is dropped
        let just_inside = order_at(9.1190, 38.7400);
        let just_outside = order_at(9.1210, 38.7400);
        let inside_id = just_inside.id;
        let svc = AssignmentService::new(
            FakeOrders::with(vec![just_outside, just_inside]),
            courier_at(Some(COURIER)),
        );

        let feed = svc.assignments_for(Uuid::new_v4()).unwrap();

        assert_eq!(feed.orders.len(), 1);
        assert_eq!(feed.orders[0].order.id, inside_id);
        assert!(
            feed.orders[0].distance_km > 9.5
                && feed.orders[0].distance_km <= MAX_ASSIGNMENT_RADIUS_KM,
            "expected ~9.9 km, got {}",
            feed.orders[0].distance_km
        );
    }

    #[test]
    fn orders_are_sorted_ascending_by_distance() {
        let closest = order_at(9.0310, 38.7405);
        let middle = order_at(9.0400, 38.7500);
        let farthest = order_at(9.0800, 38.7900);
        let ids = [closest.id, middle.id, farthest.id];
        let svc = AssignmentService::new(
            FakeOrders::with(vec![farthest, closest, middle]),
            courier_at(Some(COURIER)),
        );

        let feed = svc.assignments_for(Uuid::new_v4()).unwrap();

        let got: Vec<Uuid> = feed.orders.iter().map(|n| n.order.id).collect();
        assert_eq!(got, ids);
        for pair in feed.orders.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn already_claimed_orders_are_excluded_from_the_feed() {
        let mut claimed = order_at(9.0310, 38.7405);
        claimed.delivery_id = Some(Uuid::new_v4());
        let svc = AssignmentService::new(
            FakeOrders::with(vec![claimed]),
            courier_at(Some(COURIER)),
        );

        let feed = svc.assignments_for(Uuid::new_v4()).unwrap();

        assert!(feed.orders.is_empty());
    }

    #[test]
    fn missing_location_is_an_error_not_an_empty_feed() {
        let svc = AssignmentService::new(
            FakeOrders::with(vec![order_at(9.0310, 38.7405)]),
            courier_at(None),
        );

        let err = svc.assignments_for(Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, DomainError::MissingLocation));
    }

    #[test]
    fn unknown_courier_is_not_found() {
        let svc = AssignmentService::new(
            FakeOrders::with(vec![]),
            FakeCouriers { profile: None },
        );

        let err = svc.assignments_for(Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, DomainError::NotFound("delivery profile")));
    }

    #[test]
    fn second_claim_for_the_same_order_loses() {
        let order = order_at(9.0310, 38.7405);
        let order_id = order.id;
        let svc = AssignmentService::new(FakeOrders::with(vec![order]), courier_at(Some(COURIER)));

        let winner = Uuid::new_v4();
        let claimed = svc.claim(winner, order_id).unwrap();
        assert_eq!(claimed.delivery_id, Some(winner));
        assert_eq!(claimed.status, OrderStatus::AssignedForDelivery);

        let err = svc.claim(Uuid::new_v4(), order_id).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyAssigned));
    }

    #[test]
    fn claiming_a_nonexistent_order_is_not_found() {
        let svc = AssignmentService::new(FakeOrders::with(vec![]), courier_at(Some(COURIER)));

        let err = svc.claim(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, DomainError::NotFound("order")));
    }

    #[test]
    fn update_location_rejects_out_of_range_coordinates() {
        let svc = AssignmentService::new(FakeOrders::with(vec![]), courier_at(None));

        let err = svc.update_location(Uuid::new_v4(), 120.0, 38.74).unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
