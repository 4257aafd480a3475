use canbus_model::{BusQueue, Frame};

fn main() {
    let mut bus: BusQueue = BusQueue::new();

    let frames = [
        Frame::build(0x123, false, 4, &[0xDE, 0xAD, 0xBE, 0xEF]),
        Frame::build(0x456, false, 2, &[0xCA, 0xFE]),
    ];

    for frame in frames {
        match frame {
            Ok(frame) => {
                if let Err(err) = bus.enqueue(frame) {
                    eprintln!("Error: {err}");
                }
            }
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    for rendered in bus.drain_and_render() {
        println!("{rendered}");
    }
}
