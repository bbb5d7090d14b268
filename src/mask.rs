//! Corner masks for the rounded socket and chamfered fill tiles

/// Distance from `v` to the nearest edge of a `size`-wide tile.
fn edge_distance(v: u32, size: u32) -> u32 {
    let last = size.saturating_sub(1);
    v.min(last.saturating_sub(v))
}

/// Socket tiles lose an L-shaped notch at each corner: the corner pixel and
/// its two edge neighbours.
pub fn is_socket_corner(x: u32, y: u32, size: u32) -> bool {
    edge_distance(x, size) + edge_distance(y, size) <= 1
}

/// Fill tiles lose just the four corner pixels.
pub fn is_fill_corner(x: u32, y: u32, size: u32) -> bool {
    edge_distance(x, size) == 0 && edge_distance(y, size) == 0
}

/// Pixels that get the socket border color: the outer ring plus the cells
/// beside each notch.
pub fn is_socket_border(x: u32, y: u32, size: u32) -> bool {
    let dx = edge_distance(x, size);
    let dy = edge_distance(y, size);

    // notch neighbours sit on the ring already; they are masked out anyway
    dx == 0 || dy == 0 || dx + dy == 1
}
