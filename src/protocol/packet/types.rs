wire_enum! {
    /// Digging action, sent by the client and echoed back in acknowledgements
    pub enum DiggingStatus {
        StartedDigging = 0,
        CancelledDigging = 1,
        FinishedDigging = 2,
        DropItemStack = 3,
        DropItem = 4,
        /// Shoot arrow or finish eating
        ReleaseUseItem = 5,
        SwapItemInHand = 6,
    }
}
