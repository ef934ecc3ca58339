//! Property tests for room membership.
//!
//! Membership must behave like a plain set per (room, connection) pair:
//! whatever order joins and leaves arrive in, the final state is decided by
//! the last operation on each pair, empty rooms are never retained, and a
//! torn-down connection leaves no trace.

use std::collections::HashSet;

use proptest::prelude::*;
use tokio::sync::mpsc;

use firstalert_dispatch::adapters::websocket::ConnectionRegistry;
use firstalert_dispatch::domain::foundation::ConnectionId;
use firstalert_dispatch::domain::rooms::{RoomDirectory, RoomKey};

const CONNECTIONS: usize = 4;

fn rooms() -> Vec<RoomKey> {
    vec![
        RoomKey::General,
        RoomKey::unit("FM-1"),
        RoomKey::unit("FM-2"),
        RoomKey::unit("DISPATCH-1"),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Join { room: usize, conn: usize },
    Leave { room: usize, conn: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let join = (0..rooms().len(), 0..CONNECTIONS)
        .prop_map(|(room, conn)| Op::Join { room, conn });
    let leave = (0..rooms().len(), 0..CONNECTIONS)
        .prop_map(|(room, conn)| Op::Leave { room, conn });
    prop_oneof![join, leave]
}

proptest! {
    #[test]
    fn final_membership_is_decided_by_the_last_operation(
        ops in prop::collection::vec(op_strategy(), 0..64)
    ) {
        let rooms = rooms();
        let connections: Vec<ConnectionId> =
            (0..CONNECTIONS).map(|_| ConnectionId::new()).collect();

        let mut directory = RoomDirectory::new();
        // Reference model: the set of currently-joined (room, conn) pairs.
        let mut model: HashSet<(usize, usize)> = HashSet::new();

        for op in &ops {
            match *op {
                Op::Join { room, conn } => {
                    directory.join(rooms[room].clone(), connections[conn]);
                    model.insert((room, conn));
                }
                Op::Leave { room, conn } => {
                    directory.leave(&rooms[room], connections[conn]);
                    model.remove(&(room, conn));
                }
            }
        }

        for (room_idx, room) in rooms.iter().enumerate() {
            let expected: HashSet<ConnectionId> = (0..CONNECTIONS)
                .filter(|conn| model.contains(&(room_idx, *conn)))
                .map(|conn| connections[conn])
                .collect();
            prop_assert_eq!(directory.members(room), expected);
        }

        // Empty rooms are garbage collected, never retained.
        let occupied_rooms: HashSet<usize> =
            model.iter().map(|(room, _)| *room).collect();
        prop_assert_eq!(directory.room_count(), occupied_rooms.len());

        // The reverse index agrees with the forward one.
        for (conn_idx, conn) in connections.iter().enumerate() {
            let expected: HashSet<RoomKey> = rooms
                .iter()
                .enumerate()
                .filter(|(room_idx, _)| model.contains(&(*room_idx, conn_idx)))
                .map(|(_, room)| room.clone())
                .collect();
            prop_assert_eq!(directory.rooms_for(*conn), expected);
        }
    }

    #[test]
    fn unregister_leaves_no_trace_in_any_room(
        joins in prop::collection::vec((0..rooms().len(), 0..CONNECTIONS), 0..32),
        victim in 0..CONNECTIONS,
    ) {
        let rooms = rooms();
        let registry = ConnectionRegistry::new();

        let mut receivers = Vec::new();
        let connections: Vec<ConnectionId> = (0..CONNECTIONS)
            .map(|_| {
                let (tx, rx) = mpsc::channel(8);
                receivers.push(rx);
                registry.register(tx)
            })
            .collect();

        for (room, conn) in &joins {
            registry.join_room(connections[*conn], rooms[*room].clone()).unwrap();
        }

        registry.unregister(connections[victim]);

        prop_assert!(registry.rooms_for(connections[victim]).is_err());
        for room in &rooms {
            prop_assert!(!registry.members(room).contains(&connections[victim]));
        }

        // Everyone else keeps exactly the memberships they joined.
        for (conn_idx, conn) in connections.iter().enumerate() {
            if conn_idx == victim {
                continue;
            }
            let expected: HashSet<RoomKey> = joins
                .iter()
                .filter(|(_, join_conn)| *join_conn == conn_idx)
                .map(|(room, _)| rooms[*room].clone())
                .collect();
            prop_assert_eq!(registry.rooms_for(*conn).unwrap(), expected);
        }
    }
}
